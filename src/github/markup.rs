//! GitHub page matching rules
//!
//! GitHub offers no stable contract for the pages read here, so every
//! markup assumption (icon classes, link shapes, selector text) lives in this
//! module. The resolver only consumes the extracted values.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Last path segment of the latest-release redirect when a repository has no releases
pub const RELEASES_SENTINEL: &str = "releases";

/// Markers opening the ref-selector control
const REF_SELECTOR_MARKERS: [&str; 2] = ["ref-selector", "branch-select-menu"];

/// Bytes inspected after the ref-selector marker
const REF_SELECTOR_REGION_LEN: usize = 4096;

/// Icon class shown for branches
const BRANCH_ICON: &str = "octicon-git-branch";

/// Icon class shown for tags
const TAG_ICON: &str = "octicon-tag";

/// Commit hash embedded in commit links, tree links or page payload
static COMMIT_HASH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:/commit/|/tree/|"currentOid":")([0-9a-f]{7})[0-9a-f]{0,33}\b"#).unwrap()
});

/// Link into a `custom_components/<domain>` directory
static CUSTOM_COMPONENT_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="[^"]*/custom_components/(\w+)""#).unwrap());

/// Text of the ref-selector button
static MENU_BUTTON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"data-menu-button[^>]*>\s*([^<\s]+)\s*<").unwrap());

/// Indicator shown in the ref-selector control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefIndicator {
    /// Branch icon present
    Branch,
    /// Tag icon present (and no branch icon)
    Tag,
}

/// Extracts the version label from a latest-release redirect target
pub fn label_from_location(location: &str) -> Option<&str> {
    let location = location
        .split(['?', '#'])
        .next()
        .unwrap_or(location)
        .trim_end_matches('/');
    location
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.contains(':'))
}

/// Returns the bounded region of the page starting at the ref-selector control
pub fn ref_selector_region(page: &str) -> Option<&str> {
    let start = REF_SELECTOR_MARKERS
        .iter()
        .filter_map(|marker| page.find(marker))
        .min()?;

    let mut end = start.saturating_add(REF_SELECTOR_REGION_LEN).min(page.len());
    while !page.is_char_boundary(end) {
        end -= 1;
    }
    Some(&page[start..end])
}

/// Detects which indicator the ref-selector region shows
pub fn ref_indicator(region: &str) -> Option<RefIndicator> {
    if region.contains(BRANCH_ICON) {
        Some(RefIndicator::Branch)
    } else if region.contains(TAG_ICON) {
        Some(RefIndicator::Tag)
    } else {
        None
    }
}

/// Reads the branch name shown on the ref-selector button
pub fn default_branch(region: &str) -> Option<String> {
    MENU_BUTTON_RE
        .captures(region)
        .map(|caps| caps[1].to_string())
}

/// Finds the first short (7 character) commit hash embedded in the page
pub fn short_commit_hash(page: &str) -> Option<String> {
    COMMIT_HASH_RE
        .captures(page)
        .map(|caps| caps[1].to_string())
}

/// Finds the first link into a `custom_components/<domain>` directory
pub fn custom_component_link(page: &str) -> Option<String> {
    CUSTOM_COMPONENT_LINK_RE
        .captures(page)
        .map(|caps| caps[1].to_string())
}

/// Lists distinct `custom_components/<domain>` directories of this repository and tree, in order
pub fn custom_component_entries(page: &str, name: &str, tree: &str) -> Vec<String> {
    let pattern = format!(
        r#"href="/{}/tree/{}/custom_components/(\w+)""#,
        regex::escape(name),
        regex::escape(tree)
    );
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };

    let mut entries: Vec<String> = Vec::new();
    for caps in re.captures_iter(page) {
        let name = &caps[1];
        if !entries.iter().any(|e| e == name) {
            entries.push(name.to_string());
        }
    }
    entries
}

/// Checks whether the page links a `manifest.json` at the repository root for this tree
pub fn has_root_manifest(page: &str, name: &str, tree: &str) -> bool {
    page.contains(&format!("/{}/blob/{}/manifest.json\"", name, tree))
}

/// Returns true if the value can name a component directory
pub fn is_valid_domain(domain: &str) -> bool {
    !domain.is_empty() && domain.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Component manifest (`manifest.json`)
#[derive(Debug, Deserialize)]
struct Manifest {
    /// Declared component domain
    domain: Option<String>,
}

/// Reads the declared domain from manifest.json content
pub fn manifest_domain(content: &str) -> Result<String, String> {
    let manifest: Manifest = serde_json::from_str(content)
        .map_err(|e| format!("failed to parse JSON: {}", e))?;

    match manifest.domain {
        Some(domain) if is_valid_domain(&domain) => Ok(domain),
        Some(domain) => Err(format!("invalid domain '{}'", domain)),
        None => Err("missing domain".to_string()),
    }
}
