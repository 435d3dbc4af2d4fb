//! `clicha cai`: score a single text, a corpus file or stdin and print each article's CAI.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clicha_core::{ArticleScore, RawDocuments, ScoringContext};
use serde::Serialize;

use super::load_scoring_context;
use crate::ProcessExit;
use crate::app::config_runtime::Settings;
use crate::cli::CaiArgs;

/// One printed score with its aware verdict.
#[derive(Debug, Serialize)]
struct CaiRow<'a> {
    #[serde(flatten)]
    score: &'a ArticleScore,
    aware: bool,
}

impl<'a> CaiRow<'a> {
    fn new(context: &ScoringContext, score: &'a ArticleScore) -> Self {
        let aware = context
            .policy()
            .is_climate_aware(score.distinct, score.total, score.cai);
        Self { score, aware }
    }

    fn to_csv(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.score.index, self.score.distinct, self.score.total, self.score.cai, self.aware
        )
    }
}

pub fn run_cai_command(args: &CaiArgs, settings: &Settings) -> Result<ProcessExit> {
    let context = load_scoring_context(&args.idf, &args.keywords, settings)?;

    if !args.json {
        println!("index,distinct,total,cai,aware");
    }
    if let Some(path) = &args.file {
        let documents = RawDocuments::open(path)
            .with_context(|| format!("Failed to open corpus '{}'", path.display()))?;
        for article in documents {
            let article =
                article.with_context(|| format!("Failed to read corpus '{}'", path.display()))?;
            if article.is_blank() {
                continue;
            }
            let score = context.score_text(article.index, &article.text());
            print_score(&CaiRow::new(&context, &score), args.json)?;
        }
        return Ok(ProcessExit::Success);
    }

    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            buffer
        }
    };
    let score = context.score_text(0, &text);
    print_score(&CaiRow::new(&context, &score), args.json)?;
    Ok(ProcessExit::Success)
}

fn print_score(row: &CaiRow<'_>, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(row).context("Failed to serialize score")?;
        println!("{line}");
    } else {
        println!("{}", row.to_csv());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score() -> ArticleScore {
        ArticleScore {
            index: 4,
            distinct: 2,
            total: 3,
            cai: 1.25,
            matches: vec![("climate change".to_string(), 2), ("emissions".to_string(), 1)],
        }
    }

    #[test]
    fn test_cai_row_json_flattens_score() {
        let score = score();
        let row = CaiRow { score: &score, aware: true };
        let value: serde_json::Value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["index"], 4);
        assert_eq!(value["cai"], 1.25);
        assert_eq!(value["aware"], true);
        assert_eq!(value["matches"][0][0], "climate change");
    }

    #[test]
    fn test_cai_row_csv_columns() {
        let score = score();
        let row = CaiRow { score: &score, aware: false };
        assert_eq!(row.to_csv(), "4,2,3,1.25,false");
    }
}
