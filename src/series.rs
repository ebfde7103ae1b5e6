use crate::error::{Result, ScholarError};

// Years and counts are index aligned, non-empty and equally long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationSeries {
    years: Vec<i32>,
    counts: Vec<u32>,
}

impl CitationSeries {
    pub fn new(years: Vec<i32>, counts: Vec<u32>) -> Result<Self> {
        if years.len() != counts.len() {
            return Err(ScholarError::HistogramMismatch {
                years: years.len(),
                counts: counts.len(),
            });
        }
        if years.is_empty() {
            return Err(ScholarError::EmptyHistogram);
        }
        Ok(Self { years, counts })
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn first_year(&self) -> i32 {
        self.years[0]
    }

    pub fn last_year(&self) -> i32 {
        self.years[self.years.len() - 1]
    }

    // Bounds must be present exactly, nothing is clamped
    pub fn select(&self, start: Option<i32>, end: Option<i32>) -> Result<CitationSeries> {
        let start = start.unwrap_or_else(|| self.first_year());
        let end = end.unwrap_or_else(|| self.last_year());

        let from = self.position_of(start)?;
        let to = self.position_of(end)?;
        if from > to {
            return Err(ScholarError::InvalidRange { start, end });
        }

        Ok(CitationSeries {
            years: self.years[from..=to].to_vec(),
            counts: self.counts[from..=to].to_vec(),
        })
    }

    fn position_of(&self, year: i32) -> Result<usize> {
        self.years
            .iter()
            .position(|&y| y == year)
            .ok_or(ScholarError::YearNotFound { year })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CitationSeries {
        CitationSeries::new(
            (2014..=2021).collect(),
            vec![3, 9, 14, 22, 41, 57, 80, 96],
        )
        .unwrap()
    }

    #[test]
    fn full_bounds_return_input_unchanged() {
        let series = sample();
        let selected = series
            .select(Some(series.first_year()), Some(series.last_year()))
            .unwrap();

        assert_eq!(selected, series);
    }

    #[test]
    fn unset_bounds_default_to_full_range() {
        let series = sample();

        assert_eq!(series.select(None, None).unwrap(), series);
    }

    #[test]
    fn selects_inclusive_contiguous_slice() {
        let selected = sample().select(Some(2016), Some(2019)).unwrap();

        assert_eq!(selected.years(), &[2016, 2017, 2018, 2019]);
        assert_eq!(selected.counts(), &[14, 22, 41, 57]);
        assert_eq!(selected.len(), 2019 - 2016 + 1);
    }

    #[test]
    fn open_start_runs_from_first_year() {
        let selected = sample().select(None, Some(2015)).unwrap();

        assert_eq!(selected.years(), &[2014, 2015]);
        assert_eq!(selected.counts(), &[3, 9]);
    }

    #[test]
    fn equal_bounds_give_single_year() {
        let selected = sample().select(Some(2018), Some(2018)).unwrap();

        assert_eq!(selected.years(), &[2018]);
        assert_eq!(selected.counts(), &[41]);
    }

    #[test]
    fn absent_year_is_an_error() {
        let series = sample();

        assert!(matches!(
            series.select(Some(2010), None),
            Err(ScholarError::YearNotFound { year: 2010 })
        ));
        assert!(matches!(
            series.select(None, Some(2030)),
            Err(ScholarError::YearNotFound { year: 2030 })
        ));
    }

    #[test]
    fn reversed_bounds_are_rejected() {
        assert!(matches!(
            sample().select(Some(2020), Some(2016)),
            Err(ScholarError::InvalidRange {
                start: 2020,
                end: 2016
            })
        ));
    }

    #[test]
    fn construction_checks_alignment() {
        assert!(matches!(
            CitationSeries::new(vec![2020, 2021], vec![5]),
            Err(ScholarError::HistogramMismatch { years: 2, counts: 1 })
        ));
        assert!(matches!(
            CitationSeries::new(vec![], vec![]),
            Err(ScholarError::EmptyHistogram)
        ));
    }
}
