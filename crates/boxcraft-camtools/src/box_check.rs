//! Regression checks for generated box SVGs
//!
//! Scans the six documents for the problems that make a laser job fail or
//! a viewer refuse the file.

use crate::hinged_box::{BoxSvgs, PanelKind};
use crate::svg_export::validate_orthogonal_path;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckIssue {
    /// `None` for issues spanning several panels
    pub panel: Option<PanelKind>,
    pub message: String,
}

impl fmt::Display for CheckIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.panel {
            Some(panel) => write!(f, "{}: {}", panel, self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CheckReport {
    pub passed: bool,
    pub issues: Vec<CheckIssue>,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            return write!(f, "all checks passed");
        }
        writeln!(f, "{} issue(s):", self.issues.len())?;
        for issue in &self.issues {
            writeln!(f, "  - {}", issue)?;
        }
        Ok(())
    }
}

fn path_regex() -> &'static Regex {
    static PATH: OnceLock<Regex> = OnceLock::new();
    PATH.get_or_init(|| Regex::new(r#"<path\s+([^>]+)>"#).expect("invalid path regex"))
}

fn d_regex() -> &'static Regex {
    static D: OnceLock<Regex> = OnceLock::new();
    D.get_or_init(|| Regex::new(r#"\bd\s*=\s*["']([^"']+)["']"#).expect("invalid d regex"))
}

fn fill_none_regex() -> &'static Regex {
    static FILL: OnceLock<Regex> = OnceLock::new();
    FILL.get_or_init(|| Regex::new(r#"\bfill\s*=\s*["']none["']"#).expect("invalid fill regex"))
}

/// Structural XML problems: declaration, tag balance, quoting, one root.
pub fn xml_structure_issues(svg: &str) -> Vec<String> {
    let mut issues = Vec::new();
    let Some(body) = svg.strip_prefix("<?xml") else {
        issues.push("missing XML declaration".to_string());
        return issues;
    };
    let Some(decl_end) = body.find("?>") else {
        issues.push("unterminated XML declaration".to_string());
        return issues;
    };

    let mut rest = &body[decl_end + 2..];
    let mut stack: Vec<&str> = Vec::new();
    let mut roots = 0;

    while let Some(open) = rest.find('<') {
        if !rest[..open].trim().is_empty() && stack.is_empty() {
            issues.push("text outside the root element".to_string());
        }
        let Some(close) = rest[open..].find('>') else {
            issues.push("unterminated tag".to_string());
            return issues;
        };
        let tag = &rest[open + 1..open + close];
        rest = &rest[open + close + 1..];

        if tag.matches('"').count() % 2 != 0 {
            issues.push(format!("unbalanced quotes in <{}>", tag));
        }

        if let Some(name) = tag.strip_prefix('/') {
            match stack.pop() {
                Some(open_name) if open_name == name.trim() => {}
                Some(open_name) => issues.push(format!("</{}> closes <{}>", name.trim(), open_name)),
                None => issues.push(format!("stray </{}>", name.trim())),
            }
            continue;
        }

        let name = tag.split_whitespace().next().unwrap_or("").trim_end_matches('/');
        if name.is_empty() {
            issues.push("empty tag".to_string());
            continue;
        }
        if stack.is_empty() {
            roots += 1;
        }
        if !tag.ends_with('/') {
            stack.push(name);
        }
    }

    if !rest.trim().is_empty() {
        issues.push("text after the root element".to_string());
    }
    if let Some(open_name) = stack.last() {
        issues.push(format!("<{}> is never closed", open_name));
    }
    if roots != 1 {
        issues.push(format!("expected one root element, found {}", roots));
    }
    issues
}

fn subpath_count(d: &str) -> usize {
    d.chars().filter(|c| matches!(c, 'M' | 'm')).count()
}

/// Check one panel document. Returns its issues and its subpath count.
fn check_panel(kind: PanelKind, svg: &str, issues: &mut Vec<CheckIssue>) -> usize {
    let mut report = |message: String| {
        issues.push(CheckIssue {
            panel: Some(kind),
            message,
        })
    };

    if svg.is_empty() {
        report("empty document".to_string());
        return 0;
    }
    if svg.contains("NaN") || svg.contains("inf") {
        report("non-finite number in output".to_string());
    }
    for problem in xml_structure_issues(svg) {
        report(problem);
    }
    if svg.contains("Gradient") || svg.contains("<filter") || svg.contains("filter=") {
        report("gradients and filters are not allowed".to_string());
    }

    let mut subpaths = 0;
    let mut paths = 0;
    for caps in path_regex().captures_iter(svg) {
        paths += 1;
        let attrs = &caps[1];
        if !fill_none_regex().is_match(attrs) {
            report("path without fill=\"none\"".to_string());
        }
        match d_regex().captures(attrs) {
            Some(d) => {
                if let Err(e) = validate_orthogonal_path(&d[1]) {
                    report(e.to_string());
                }
                subpaths += subpath_count(&d[1]);
            }
            None => report("path without path data".to_string()),
        }
    }
    if paths == 0 {
        report("no <path> element".to_string());
    }
    subpaths
}

/// Run every check over the six panels.
pub fn check_hinged_box_svgs(svgs: &BoxSvgs) -> CheckReport {
    let mut issues = Vec::new();
    let mut left = 0;
    let mut right = 0;

    for (kind, svg) in svgs.iter() {
        let subpaths = check_panel(kind, svg, &mut issues);
        match kind {
            PanelKind::Left => left = subpaths,
            PanelKind::Right => right = subpaths,
            _ => {}
        }
    }

    // One outline each, so equal subpaths means equal holes.
    if left != right {
        issues.push(CheckIssue {
            panel: None,
            message: format!(
                "left panel has {} hole(s), right panel has {}",
                left.saturating_sub(1),
                right.saturating_sub(1)
            ),
        });
    }

    let passed = issues.is_empty();
    if passed {
        info!("hinged box SVG check passed");
    } else {
        for issue in &issues {
            warn!(%issue, "hinged box SVG check");
        }
    }
    CheckReport { passed, issues }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"<?xml version="1.0" encoding="UTF-8"?><svg xmlns="http://www.w3.org/2000/svg" width="14mm" height="14mm" viewBox="0 0 14 14"><path d="M 2 2 L 12 2 L 12 12 Z" fill="none" stroke="black"/></svg>"#;

    fn all(svg: &str) -> BoxSvgs {
        let mut svgs = BoxSvgs::default();
        for kind in PanelKind::ALL {
            *svgs.get_mut(kind) = svg.to_string();
        }
        svgs
    }

    #[test]
    fn test_good_documents_pass() {
        let report = check_hinged_box_svgs(&all(GOOD));
        assert!(report.passed, "{}", report);
        assert_eq!(report.to_string(), "all checks passed");
    }

    #[test]
    fn test_xml_structure() {
        assert!(xml_structure_issues(GOOD).is_empty());
        assert!(!xml_structure_issues("<svg></svg>").is_empty());
        assert!(!xml_structure_issues(r#"<?xml version="1.0"?><svg><g></svg>"#).is_empty());
        assert!(!xml_structure_issues(r#"<?xml version="1.0"?><svg></svg><svg></svg>"#).is_empty());
        assert!(!xml_structure_issues(r#"<?xml version="1.0"?><svg><path d="M 0 0/></svg>"#).is_empty());
    }

    #[test]
    fn test_detects_fill_and_nan() {
        let mut svgs = all(GOOD);
        svgs.front = GOOD.replace(r#"fill="none""#, r#"fill="red""#);
        svgs.lid = GOOD.replace("12 12", "NaN 12");
        let report = check_hinged_box_svgs(&svgs);
        assert!(!report.passed);
        assert!(report
            .issues
            .iter()
            .any(|i| i.panel == Some(PanelKind::Front) && i.message.contains("fill")));
        assert!(report
            .issues
            .iter()
            .any(|i| i.panel == Some(PanelKind::Lid) && i.message.contains("non-finite")));
    }

    #[test]
    fn test_detects_curves_and_gradients() {
        let mut svgs = all(GOOD);
        svgs.back = GOOD.replace("L 12 12", "C 1 1 2 2 12 12");
        svgs.bottom = GOOD.replace("<path", "<linearGradient id=\"g\"/><path");
        let report = check_hinged_box_svgs(&svgs);
        assert!(report.issues.iter().any(|i| i.panel == Some(PanelKind::Back)));
        assert!(report.issues.iter().any(|i| i.panel == Some(PanelKind::Bottom)));
    }

    #[test]
    fn test_detects_hole_asymmetry() {
        let mut svgs = all(GOOD);
        svgs.left = GOOD.replace(" Z\"", " Z M 5 5 L 6 5 L 6 6 Z\"");
        let report = check_hinged_box_svgs(&svgs);
        assert!(!report.passed);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].panel, None);
        assert!(report.issues[0].message.contains("left panel has 1 hole(s), right panel has 0"));
    }

    #[test]
    fn test_empty_document_fails() {
        let mut svgs = all(GOOD);
        svgs.right = String::new();
        assert!(!check_hinged_box_svgs(&svgs).passed);
    }
}
