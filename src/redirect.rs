use reqwest::Url;

/// Query parameter set by the redirect-based submission flow.
const SUCCESS_PARAM: &str = "success";

/// Check a page address for the `success=1` flag.
///
/// # Returns
/// * `Some(path)` with the cleaned address (path only) when the flag is set
/// * `None` when the flag is absent or the address cannot be parsed
pub fn take_success_flag(address: &str) -> Option<String> {
    let url = Url::parse(address).ok()?;

    // Only the first occurrence of the parameter counts
    let flagged = url
        .query_pairs()
        .find(|(key, _)| key == SUCCESS_PARAM)
        .is_some_and(|(_, value)| value == "1");

    flagged.then(|| url.path().to_string())
}
