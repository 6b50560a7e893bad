//! Offline inspection of a single reference.

use estate::{CandidatePaths, EstateConfig, PublicUrlBuilder, RawReference};

/// Print the classification, normalized path, and ordered candidates.
pub fn show_candidates(config: &EstateConfig, raw: &str, property_id: &str, owner_id: Option<&str>) {
    let reference = RawReference::classify(raw, &config.storage.bucket);
    let urls = PublicUrlBuilder::new(&config.storage);

    println!("reference: {:?}", reference);
    match &reference {
        RawReference::Empty => {
            println!("(skipped: nothing left after normalization)");
            return;
        }
        RawReference::ExternalUrl(url) => {
            println!("(external, used as is: {})", url);
            return;
        }
        _ => println!("path: {}", reference.path()),
    }

    let candidates = CandidatePaths::generate(&reference, property_id, owner_id);
    for (i, candidate) in candidates.iter().enumerate() {
        println!("{:>2}. {}  {}", i + 1, candidate, urls.build(candidate));
    }
}
