use rand::distributions::Alphanumeric;
use rand::Rng;

const PEER_NAME_PREFIX: &str = "_CNW_";
const PEER_NAME_RANDOM_LEN: usize = 24;

/// Returns a fresh peer name, unique with overwhelming probability.
pub fn random_peer_name() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PEER_NAME_RANDOM_LEN)
        .map(char::from)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    format!("{}{}", PEER_NAME_PREFIX, suffix)
}
