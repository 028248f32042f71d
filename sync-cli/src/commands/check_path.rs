//! Run the directory path validator on user text.

use mediasync_core::{is_valid_path, normalize_directory};

/// Run the check-path command. Returns whether the input was accepted.
pub fn run(input: &str) -> bool {
    let candidate = normalize_directory(input);
    let accepted = is_valid_path(&candidate);
    if accepted {
        println!("valid: {}", candidate);
    } else {
        println!("rejected: {:?} does not look like a directory path", candidate);
    }
    accepted
}
