use crate::error::{Result, ScholarError};
use crate::series::CitationSeries;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

// Markup of the profile host, matched exactly
pub const HISTOGRAM_CLASS: &str = "gsc_md_hist_b";
pub const YEAR_CLASS: &str = "gsc_g_t";
pub const COUNT_CLASS: &str = "gsc_g_al";
pub const NAME_ID: &str = "gsc_prf_in";
pub const AFFILIATION_CLASS: &str = "gsc_prf_il";
pub const STAT_VALUE_CLASS: &str = "gsc_rsb_std";

const DIGITS_PATTERN: &str = r"\d+";

const SUMMARY_LEN: usize = 5;

#[derive(Debug, Clone, Copy)]
pub enum Marker {
    Id(&'static str),
    Class(&'static str),
    Tag(&'static str),
}

impl Marker {
    fn selector(self) -> Result<Selector> {
        let css = match self {
            Marker::Id(id) => format!("#{}", id),
            Marker::Class(class) => format!(".{}", class),
            Marker::Tag(tag) => tag.to_string(),
        };
        Selector::parse(&css).map_err(|e| ScholarError::Selector {
            selector: css.clone(),
            reason: format!("{:?}", e),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileIdentity {
    pub name: String,
    pub affiliation: String,
}

// Cells 0, 2 and 4 are the all-time citations, h-index and i10-index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryStats {
    values: Vec<u32>,
}

impl SummaryStats {
    pub fn from_values(values: Vec<u32>) -> Result<Self> {
        if values.len() < SUMMARY_LEN {
            return Err(ScholarError::MalformedSummary {
                found: values.len(),
            });
        }
        if values.len() > SUMMARY_LEN + 1 {
            debug!(found = values.len(), "summary table has extra cells, ignoring them");
        }
        Ok(Self { values })
    }

    pub fn citations(&self) -> u32 {
        self.values[0]
    }

    pub fn h_index(&self) -> u32 {
        self.values[2]
    }

    pub fn i10_index(&self) -> u32 {
        self.values[4]
    }
}

pub struct ProfileDocument {
    html: Html,
}

impl ProfileDocument {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    pub fn find(&self, marker: Marker) -> Result<Option<ElementRef<'_>>> {
        let selector = marker.selector()?;
        Ok(self.html.select(&selector).next())
    }

    pub fn find_all(&self, marker: Marker) -> Result<Vec<ElementRef<'_>>> {
        let selector = marker.selector()?;
        Ok(self.html.select(&selector).collect())
    }

    pub fn citation_series(&self) -> Result<CitationSeries> {
        let histogram = self
            .find(Marker::Class(HISTOGRAM_CLASS))?
            .ok_or(ScholarError::StructureNotFound {
                region: "citation histogram (class gsc_md_hist_b)",
            })?;
        let digits = Regex::new(DIGITS_PATTERN)?;

        let years = find_all_within(histogram, Marker::Class(YEAR_CLASS))?
            .into_iter()
            .map(|label| digit_run::<i32>(&digits, "histogram year", &text_of(label)))
            .collect::<Result<Vec<_>>>()?;
        let counts = find_all_within(histogram, Marker::Class(COUNT_CLASS))?
            .into_iter()
            .map(|bar| digit_run::<u32>(&digits, "histogram count", &text_of(bar)))
            .collect::<Result<Vec<_>>>()?;

        debug!(years = years.len(), counts = counts.len(), "histogram scanned");
        CitationSeries::new(years, counts)
    }

    pub fn identity(&self) -> Result<ProfileIdentity> {
        let name = self
            .find(Marker::Id(NAME_ID))?
            .map(text_of)
            .ok_or(ScholarError::StructureNotFound {
                region: "profile name (id gsc_prf_in)",
            })?;

        let affiliation_block =
            self.find(Marker::Class(AFFILIATION_CLASS))?
                .ok_or(ScholarError::StructureNotFound {
                    region: "affiliation (class gsc_prf_il)",
                })?;
        let affiliation = match find_all_within(affiliation_block, Marker::Tag("a"))?.first() {
            Some(anchor) => text_of(*anchor),
            None => text_of(affiliation_block).trim().to_string(),
        };

        Ok(ProfileIdentity { name, affiliation })
    }

    pub fn summary(&self) -> Result<SummaryStats> {
        let values = self
            .find_all(Marker::Class(STAT_VALUE_CLASS))?
            .into_iter()
            .map(|cell| parse_number::<u32>("summary statistic", text_of(cell).trim()))
            .collect::<Result<Vec<_>>>()?;
        SummaryStats::from_values(values)
    }
}

// Descendants of `scope` carrying the marker, in document order
pub fn find_all_within<'a>(scope: ElementRef<'a>, marker: Marker) -> Result<Vec<ElementRef<'a>>> {
    let selector = marker.selector()?;
    Ok(scope.select(&selector).collect())
}

pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn digit_run<T: std::str::FromStr>(digits: &Regex, region: &'static str, text: &str) -> Result<T> {
    match digits.find(text) {
        Some(run) => parse_number(region, run.as_str()),
        None => Err(ScholarError::InvalidNumber {
            region,
            text: text.to_string(),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(region: &'static str, text: &str) -> Result<T> {
    text.parse::<T>().map_err(|_| ScholarError::InvalidNumber {
        region,
        text: text.to_string(),
    })
}
