//! Query construction for policy searches.

use super::scoring::contains_policy_keyword;

/// Qualifier appended to keywords that carry no policy term of their own.
pub const POLICY_QUALIFIER: &str = "政策";

/// Build the engine query for a policy search.
///
/// Appends [`POLICY_QUALIFIER`] unless the keyword already contains a policy
/// keyword, then prefixes the region when one is given. Blank regions are
/// treated as absent.
///
/// ```
/// use scout_search::orchestrator::query::build_query;
///
/// assert_eq!(build_query("产业链", None), "产业链 政策");
/// assert_eq!(build_query("行动计划", Some("江西省")), "江西省 行动计划");
/// ```
pub fn build_query(keyword: &str, region: Option<&str>) -> String {
    let mut query = if contains_policy_keyword(keyword) {
        keyword.to_string()
    } else {
        format!("{keyword} {POLICY_QUALIFIER}")
    };

    if let Some(region) = non_blank(region) {
        query = format!("{region} {query}");
    }

    query
}

/// Build the engine query for an advanced policy search.
///
/// The keyword is used verbatim; `site:` and `filetype:` operators are
/// appended in that order when present.
pub fn build_advanced_query(keyword: &str, site: Option<&str>, file_type: Option<&str>) -> String {
    let mut query = keyword.to_string();
    if let Some(site) = non_blank(site) {
        query.push_str(" site:");
        query.push_str(site);
    }
    if let Some(file_type) = non_blank(file_type) {
        query.push_str(" filetype:");
        query.push_str(file_type);
    }
    query
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifier_appended_without_keyword() {
        assert_eq!(build_query("人工智能", None), "人工智能 政策");
    }

    #[test]
    fn qualifier_skipped_when_keyword_present() {
        assert_eq!(build_query("关于印发方案的通知", None), "关于印发方案的通知");
    }

    #[test]
    fn region_is_prefixed() {
        assert_eq!(build_query("产业链", Some("江西省")), "江西省 产业链 政策");
        assert_eq!(
            build_query("江西省1269行动计划", Some("江西省")),
            "江西省 江西省1269行动计划"
        );
    }

    #[test]
    fn blank_region_is_ignored() {
        assert_eq!(build_query("产业链", Some("  ")), "产业链 政策");
        assert_eq!(build_query("产业链", Some("")), "产业链 政策");
    }

    #[test]
    fn advanced_query_operators_in_order() {
        assert_eq!(
            build_advanced_query("人工智能", Some("gov.cn"), Some("pdf")),
            "人工智能 site:gov.cn filetype:pdf"
        );
        assert_eq!(
            build_advanced_query("人工智能", None, Some("pdf")),
            "人工智能 filetype:pdf"
        );
        assert_eq!(
            build_advanced_query("人工智能", Some("miit.gov.cn"), None),
            "人工智能 site:miit.gov.cn"
        );
    }

    #[test]
    fn advanced_query_keeps_keyword_verbatim() {
        // No qualifier: the operators already narrow the search.
        assert_eq!(build_advanced_query("产业链", None, None), "产业链");
    }
}
