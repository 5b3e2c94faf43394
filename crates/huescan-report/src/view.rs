//! Flat, template-friendly views over a [`Report`].

use huescan_css::{CanonicalColor, Hsla, Report, ResolvedVariable, Swatch};
use serde::Serialize;

/// Occurrence count above which a color is marked popular.
pub const POPULAR_ABOVE: usize = 3;

/// Occurrence count above which a color is marked most popular.
pub const MOST_POPULAR_ABOVE: usize = 5;

/// CSS class for a color's popularity, if any.
///
/// ```
/// use huescan_report::view::popularity_class;
///
/// assert_eq!(popularity_class(3), "");
/// assert_eq!(popularity_class(4), "color--popular");
/// assert_eq!(popularity_class(6), "color--most-popular");
/// ```
#[must_use]
pub const fn popularity_class(count: usize) -> &'static str {
    if count > MOST_POPULAR_ABOVE {
        "color--most-popular"
    } else if count > POPULAR_ABOVE {
        "color--popular"
    } else {
        ""
    }
}

/// One rendered swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwatchView {
    /// Variable name, for variable swatches.
    pub name: Option<String>,
    /// Display string, also used as the swatch's CSS background.
    pub label: String,
    /// Space-separated CSS classes.
    pub classes: String,
    /// Occurrences.
    pub count: usize,
    /// Distinct files.
    pub files: usize,
    /// sRGB channels of the swatch, `None` for keywords and non-colors.
    #[serde(skip)]
    pub rgb: Option<(u8, u8, u8)>,
    /// Whether the swatch needs light text.
    pub dark: bool,
}

impl SwatchView {
    /// Build a view of any ranked entry.
    #[must_use]
    pub fn new<T: Swatch>(item: &T) -> Self {
        let mut classes = vec!["color"];
        if item.is_dark() {
            classes.push("color--dark");
        }
        let popularity = popularity_class(item.occurrences());
        if !popularity.is_empty() {
            classes.push(popularity);
        }

        Self {
            name: None,
            label: item.display().to_string(),
            classes: classes.join(" "),
            count: item.occurrences(),
            files: item.file_count(),
            rgb: item
                .color()
                .and_then(CanonicalColor::as_hsla)
                .map(Hsla::to_rgb),
            dark: item.is_dark(),
        }
    }

    /// Build a view of a color variable, labelled with its name.
    #[must_use]
    pub fn variable(var: &ResolvedVariable) -> Self {
        Self {
            name: Some(var.name.clone()),
            ..Self::new(var)
        }
    }

    /// `"N in M"`: occurrences in distinct files.
    #[must_use]
    pub fn counter(&self) -> String {
        format!("{} in {}", self.count, self.files)
    }
}

/// A non-color variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueView {
    /// Variable name.
    pub name: String,
    /// Value as written.
    pub value: String,
}

/// One file's variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileView {
    /// Path as displayed.
    pub path: String,
    /// Color variables, ranked.
    pub colors: Vec<SwatchView>,
    /// Other variables, in declaration order.
    pub values: Vec<ValueView>,
}

/// Everything a renderer needs, independent of output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportView {
    /// `colors` or `variables`.
    pub mode: String,
    /// Numeric color swatches (colors mode).
    pub swatches: Vec<SwatchView>,
    /// Keyword swatches (colors mode).
    pub keywords: Vec<SwatchView>,
    /// Per-file variables (variables mode).
    pub files: Vec<FileView>,
    /// Files processed.
    pub files_scanned: usize,
    /// Distinct colors removed by the popularity filter.
    pub filtered_out: usize,
}

impl ReportView {
    /// Flatten a report.
    #[must_use]
    pub fn new(report: &Report) -> Self {
        match report {
            Report::Colors(colors) => Self {
                mode: "colors".to_string(),
                swatches: colors.colors.iter().map(SwatchView::new).collect(),
                keywords: colors.keywords.iter().map(SwatchView::new).collect(),
                files: Vec::new(),
                files_scanned: colors.files_scanned,
                filtered_out: colors.filtered_out,
            },
            Report::Variables(variables) => Self {
                mode: "variables".to_string(),
                swatches: Vec::new(),
                keywords: Vec::new(),
                files: variables
                    .files
                    .iter()
                    .map(|file| FileView {
                        path: file.path.display().to_string(),
                        colors: file.color_variables.iter().map(SwatchView::variable).collect(),
                        values: file
                            .other_values
                            .iter()
                            .map(|v| ValueView {
                                name: v.name.clone(),
                                value: v.raw_value.clone(),
                            })
                            .collect(),
                    })
                    .collect(),
                files_scanned: variables.files_scanned,
                filtered_out: 0,
            },
        }
    }
}
