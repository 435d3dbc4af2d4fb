//! Config command handlers: show effective configuration.

use crate::app::config_runtime::Settings;
use crate::app_config::LoadedConfig;

pub fn run_config_show_command(settings: &Settings, loaded_config: &LoadedConfig) {
    let resolved_path = loaded_config.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded_config.loaded_from_file {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!("normalization = {}", settings.normalization);
    println!("concurrency = {}", settings.concurrency);
    println!("chunk_size = {}", settings.chunk_size);
    println!("articles_per_year = {}", settings.articles_per_year);
    println!("min_documents = {}", settings.min_documents);
    println!("aware_min_distinct = {}", settings.policy.aware_min_distinct);
    println!("aware_min_total = {}", settings.policy.aware_min_total);
    println!("aware_min_cai = {}", settings.policy.aware_min_cai);
    println!("cai_min_distinct = {}", settings.policy.cai_min_distinct);
    println!("unseen_term_weight = {}", settings.policy.unseen_term_weight);
    println!("verbosity = {}", settings.verbosity.as_str());
}
