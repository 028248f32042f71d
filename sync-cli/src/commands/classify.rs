//! Show media kind and MIME type per file name.

use mediasync_core::{classify, mime_type};

/// Run the classify command.
pub fn run(files: &[String]) {
    for file in files {
        let kind = classify(file);
        println!("{:<7} {:<24} {}", kind.as_str(), mime_type(kind, file), file);
    }
}
