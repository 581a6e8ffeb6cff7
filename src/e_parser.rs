use crate::e_target::AntTarget;
use crate::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;

static TARGET_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<target\s+name="([^"]+)""#).expect("valid target regex"));
static DESCRIPTION_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"description="([^"]*)""#).expect("valid description regex"));
static DEPENDS_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"depends="([^"]*)""#).expect("valid depends regex"));

/// Scans build file text line by line and returns the declared targets in
/// the order they appear.
///
/// A line declares a target when it contains `<target` followed by
/// whitespace and a `name="..."` attribute. `description` and `depends` are
/// only looked up on that same line; attributes wrapped onto a following
/// line are treated as absent.
///
/// # Example
/// ```
/// use ant_e::e_parser::parse_targets;
///
/// let xml = "<project>\n  <target name=\"init\" description=\"Initialize\">\n  <target name=\"clean\">\n</project>\n";
/// let targets = parse_targets(xml, "build.xml");
/// assert_eq!(targets.len(), 2);
/// assert_eq!(targets[0].name, "init");
/// assert_eq!(targets[0].location.line, 2);
/// assert_eq!(targets[1].description, "");
/// ```
pub fn parse_targets(xml: &str, build_file: impl AsRef<Path>) -> Vec<AntTarget> {
    let build_file = build_file.as_ref();
    let mut targets = Vec::new();

    for (index, line) in xml.lines().enumerate() {
        let Some(caps) = TARGET_OPEN.captures(line) else {
            continue;
        };
        let name = &caps[1];
        let description = capture_attr(&DESCRIPTION_ATTR, line);
        let depends = capture_attr(&DEPENDS_ATTR, line);

        if targets.len() < 5 {
            debug!("Target: {}, description: '{}'", name, description);
        }
        targets.push(AntTarget::new(
            name,
            description,
            depends,
            build_file,
            index + 1,
        ));
    }

    debug!("Total targets parsed: {}", targets.len());
    targets
}

fn capture_attr<'a>(re: &Regex, line: &'a str) -> &'a str {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"<project name="demo" default="build">
  <target name="init" description="Initialize" depends="">
  </target>
  <target name="clean">
  </target>
  <target name="build" description="Build all" depends="init,clean">
  </target>
</project>
"#;

    #[test]
    fn test_scenario_order_and_attributes() {
        let targets = parse_targets(SCENARIO, "build.xml");
        let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["init", "clean", "build"]);
        assert_eq!(targets[0].description, "Initialize");
        assert_eq!(targets[0].depends, "");
        assert_eq!(targets[1].description, "");
        assert_eq!(targets[2].depends, "init,clean");
        assert_eq!(
            targets.iter().map(|t| t.location.line).collect::<Vec<_>>(),
            vec![2, 4, 6]
        );
        assert!(targets
            .iter()
            .all(|t| t.location.file == Path::new("build.xml")));
    }

    #[test]
    fn test_continuation_line_attributes_are_ignored() {
        let xml = "<target name=\"x\"\n  description=\"d\"/>";
        let targets = parse_targets(xml, "build.xml");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "x");
        assert_eq!(targets[0].description, "");
        assert_eq!(targets[0].location.line, 1);
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert!(parse_targets("", "build.xml").is_empty());
        assert!(parse_targets("not xml at all\n\u{0}\u{fffd}<<<>>>", "build.xml").is_empty());
        assert!(parse_targets("<target>\n<target name=\"\">", "build.xml").is_empty());
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let xml = "<target name=\"dup\"/>\n<target name=\"dup\" description=\"again\"/>";
        let targets = parse_targets(xml, "build.xml");
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].location.line, 1);
        assert_eq!(targets[1].location.line, 2);
        assert_eq!(targets[1].description, "again");
    }

    #[test]
    fn test_attribute_order_after_name_does_not_matter() {
        let xml = r#"  <target name="dist" depends="jar"   description="Make a release"  >"#;
        let targets = parse_targets(xml, "build.xml");
        assert_eq!(targets[0].description, "Make a release");
        assert_eq!(targets[0].depends, "jar");
    }

    #[test]
    fn test_name_must_follow_target_keyword() {
        // Only `<target` + whitespace + `name=` opens a declaration.
        let xml = "<target if=\"x\" name=\"late\"/>\n<targets name=\"plural\"/>";
        assert!(parse_targets(xml, "build.xml").is_empty());
    }

    #[test]
    fn test_crlf_and_tabs() {
        let xml = "<project>\r\n\t<target\tname=\"win\" description=\"CRLF\">\r\n</project>\r\n";
        let targets = parse_targets(xml, "build.xml");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "win");
        assert_eq!(targets[0].description, "CRLF");
        assert_eq!(targets[0].location.line, 2);
    }

    #[test]
    fn test_count_matches_opening_lines() {
        let xml = (1..=40)
            .map(|i| {
                if i % 3 == 0 {
                    format!("<target name=\"t{}\">", i)
                } else {
                    format!("<echo message=\"{}\"/>", i)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        let targets = parse_targets(&xml, "build.xml");
        assert_eq!(targets.len(), 13);
        assert!(targets
            .windows(2)
            .all(|w| w[0].location.line < w[1].location.line));
    }
}
