use crate::manifest::TypeSummary;

/// Types listed in the "Default Components" section; everything else goes
/// to "Other Components".
pub const DEFAULT_COMPONENT_TYPES: &[&str] = &[
    "ApexClass",
    "ApexComponent",
    "ApexPage",
    "ApexTrigger",
    "AuraDefinitionBundle",
    "LightningComponentBundle",
];

const TABLE_HEADER: &str = "| Include | # | Metadata Type | Members Count |\n|---------|--:|---------------|-------------:|\n";

/// Inputs for one rendered checklist.
pub struct ReportInput<'a> {
    pub org_label: &'a str,
    pub file_name: &'a str,
    pub summaries: &'a [TypeSummary],
    pub total_types: usize,
    pub total_members: usize,
}

struct Section<'a> {
    title: &'static str,
    empty_note: &'static str,
    rows: Vec<&'a TypeSummary>,
}

impl<'a> Section<'a> {
    fn new(title: &'static str, empty_note: &'static str, mut rows: Vec<&'a TypeSummary>) -> Self {
        rows.sort_by(|a, b| b.member_count.cmp(&a.member_count));
        Self {
            title,
            empty_note,
            rows,
        }
    }

    fn member_total(&self) -> usize {
        self.rows.iter().map(|row| row.member_count).sum()
    }
}

fn is_default_type(name: &str) -> bool {
    DEFAULT_COMPONENT_TYPES.contains(&name)
}

/// Render the Markdown review checklist for `input`.
pub fn render(input: &ReportInput<'_>) -> String {
    let (defaults, others): (Vec<&TypeSummary>, Vec<&TypeSummary>) = input
        .summaries
        .iter()
        .partition(|summary| is_default_type(&summary.name));
    let sections = [
        Section::new(
            "Default Components",
            "*No default component types found.*",
            defaults,
        ),
        Section::new(
            "Other Components",
            "*No other component types found.*",
            others,
        ),
    ];

    let mut out = String::new();
    append_header(&mut out, input);
    append_usage_note(&mut out);
    for section in &sections {
        append_section(&mut out, section);
    }
    append_total(&mut out, input);
    out
}

fn append_header(out: &mut String, input: &ReportInput<'_>) {
    out.push_str("# Manifest Analysis Report\n\n");
    out.push_str(&format!("- **Org**: {}\n", input.org_label));
    out.push_str(&format!("- **Manifest**: {}\n", input.file_name));
    out.push_str(&format!("- **Metadata Types**: {}\n", input.total_types));
    out.push_str(&format!("- **Total Members**: {}\n\n", input.total_members));
}

fn append_usage_note(out: &mut String) {
    out.push_str("> **How to use**: rows marked `[x]` are kept in the manifest on the next run.\n");
    out.push_str("> Change a row to `[ ]` to leave that metadata type out. When every row is\n");
    out.push_str("> checked (or none is), the next run regenerates the full manifest.\n\n");
}

fn append_section(out: &mut String, section: &Section<'_>) {
    out.push_str(&format!("## {}\n\n", section.title));
    if section.rows.is_empty() {
        out.push_str(&format!("{}\n\n", section.empty_note));
        return;
    }
    out.push_str(TABLE_HEADER);
    for (idx, row) in section.rows.iter().enumerate() {
        out.push_str(&format!(
            "| [x] | {} | {} | {} |\n",
            idx + 1,
            row.name,
            row.member_count
        ));
    }
    out.push_str(&format!(
        "| | | **Subtotal: {} types** | **{}** |\n\n",
        section.rows.len(),
        section.member_total()
    ));
}

fn append_total(out: &mut String, input: &ReportInput<'_>) {
    out.push_str("---\n\n");
    out.push_str(&format!(
        "**Total: {} types / {} members**\n",
        input.total_types, input.total_members
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, member_count: usize) -> TypeSummary {
        TypeSummary {
            name: name.to_string(),
            member_count,
            members: Vec::new(),
            first_member: String::new(),
            last_member: String::new(),
        }
    }

    fn sample() -> Vec<TypeSummary> {
        vec![
            summary("ApexClass", 50),
            summary("ApexTrigger", 10),
            summary("CustomObject", 30),
            summary("Layout", 20),
        ]
    }

    fn render_sample(summaries: &[TypeSummary]) -> String {
        render(&ReportInput {
            org_label: "testOrg",
            file_name: "fullManifest.xml",
            summaries,
            total_types: summaries.len(),
            total_members: summaries.iter().map(|s| s.member_count).sum(),
        })
    }

    fn checked_rows(section: &str) -> Vec<&str> {
        section
            .lines()
            .filter(|line| line.starts_with("| [x] |"))
            .collect()
    }

    #[test]
    fn header_names_org_and_manifest() {
        let report = render_sample(&sample());
        assert!(report.starts_with("# Manifest Analysis Report\n"));
        assert!(report.contains("- **Org**: testOrg"));
        assert!(report.contains("- **Manifest**: fullManifest.xml"));
        assert!(report.contains("How to use"));
    }

    #[test]
    fn splits_default_and_other_sections() {
        let report = render_sample(&sample());
        let (default_section, other_section) = report
            .split_once("## Other Components")
            .expect("other section");
        assert!(default_section.contains("## Default Components"));
        assert!(default_section.contains("ApexClass"));
        assert!(default_section.contains("ApexTrigger"));
        assert!(!default_section.contains("| CustomObject |"));
        assert!(other_section.contains("CustomObject"));
        assert!(other_section.contains("Layout"));
    }

    #[test]
    fn sorts_each_section_by_member_count_descending() {
        let mut input = sample();
        input.reverse();
        let report = render_sample(&input);
        let (default_section, other_section) = report
            .split_once("## Other Components")
            .expect("other section");

        let defaults = checked_rows(default_section);
        assert_eq!(defaults, vec!["| [x] | 1 | ApexClass | 50 |", "| [x] | 2 | ApexTrigger | 10 |"]);
        let others = checked_rows(other_section);
        assert_eq!(others, vec!["| [x] | 1 | CustomObject | 30 |", "| [x] | 2 | Layout | 20 |"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let input = vec![summary("Flow", 5), summary("Report", 5), summary("Layout", 5)];
        let report = render_sample(&input);
        let rows = checked_rows(&report);
        assert_eq!(
            rows,
            vec!["| [x] | 1 | Flow | 5 |", "| [x] | 2 | Report | 5 |", "| [x] | 3 | Layout | 5 |"]
        );
    }

    #[test]
    fn subtotals_and_grand_total() {
        let report = render_sample(&sample());
        assert!(report.contains("| | | **Subtotal: 2 types** | **60** |"));
        assert!(report.contains("| | | **Subtotal: 2 types** | **50** |"));
        assert!(report.contains("**Total: 4 types / 110 members**"));
    }

    #[test]
    fn every_row_starts_checked() {
        let report = render_sample(&sample());
        assert_eq!(checked_rows(&report).len(), 4);
    }

    #[test]
    fn empty_sections_get_placeholder() {
        let report = render_sample(&[summary("CustomObject", 5)]);
        assert!(report.contains("*No default component types found.*"));
        assert!(report.contains("| [x] | 1 | CustomObject | 5 |"));

        let report = render_sample(&[summary("ApexClass", 3)]);
        assert!(report.contains("*No other component types found.*"));
    }

    #[test]
    fn default_type_table_is_exhaustive_lookup() {
        for name in DEFAULT_COMPONENT_TYPES {
            assert!(is_default_type(name));
        }
        assert!(!is_default_type("CustomObject"));
        assert!(!is_default_type("apexclass"));
    }
}
