use dx_config::AppConfig;
use dx_core::{classify, output_key, DocumentKind};

pub fn run(config: &AppConfig, keys: &[String]) {
    let prefix = config.output.key_prefix();

    for key in keys {
        let kind = classify(key);
        match kind {
            DocumentKind::Unsupported => println!("{}\t{}\t-", key, kind),
            _ => println!("{}\t{}\t{}", key, kind, output_key(&prefix, key)),
        }
    }
}
