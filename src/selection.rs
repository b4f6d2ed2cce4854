//! Headless adapter between the road/section pickers and the query layer.
//!
//! A front end forwards picker and toggle events here and applies the
//! returned [`Update`] to whatever chart and map widgets it owns.

use log::{debug, warn};

use crate::coords::{GridConverter, MapView};
use crate::error::QueryError;
use crate::index::SectionEntry;
use crate::record::SectionKey;
use crate::series::{ChartData, SeriesExtractor};
use crate::store::RecordStore;

pub const PLACEHOLDER_LABEL: &str = "-- Select a Road Section ---";

/// One entry in the section picker. The key rides along as opaque data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOption {
    pub label: String,
    pub key: Option<SectionKey>,
}

impl SectionOption {
    fn placeholder() -> Self {
        Self {
            label: PLACEHOLDER_LABEL.to_string(),
            key: None,
        }
    }
}

impl From<&SectionEntry> for SectionOption {
    fn from(entry: &SectionEntry) -> Self {
        Self {
            label: entry.label(),
            key: entry.key,
        }
    }
}

/// What the front end should do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Clear the chart and map and hide the column toggles.
    Reset,
    /// Redraw the chart; recentre the map when `map` is set.
    Redraw {
        chart: Option<ChartData>,
        map: Option<MapView>,
    },
    /// Nothing to change.
    Unchanged,
}

#[derive(Debug, Clone)]
struct Toggle {
    column: String,
    checked: bool,
}

/// Selection state for one session over a loaded store.
pub struct Dashboard<'a, C: GridConverter> {
    store: &'a RecordStore,
    converter: C,
    road: Option<String>,
    options: Vec<SectionOption>,
    selected: usize,
    toggles: Vec<Toggle>,
}

impl<'a, C: GridConverter> Dashboard<'a, C> {
    pub fn new<S: AsRef<str>>(store: &'a RecordStore, converter: C, columns: &[S]) -> Self {
        Self {
            store,
            converter,
            road: None,
            options: vec![SectionOption::placeholder()],
            selected: 0,
            toggles: columns
                .iter()
                .map(|c| Toggle {
                    column: c.as_ref().to_string(),
                    checked: false,
                })
                .collect(),
        }
    }

    /// Options for the road picker.
    pub fn roads(&self) -> &[String] {
        self.store.index().roads()
    }

    pub fn road(&self) -> Option<&str> {
        self.road.as_deref()
    }

    /// Current section picker options, placeholder first.
    pub fn section_options(&self) -> &[SectionOption] {
        &self.options
    }

    pub fn selected_section(&self) -> usize {
        self.selected
    }

    /// Columns currently toggled on, in toggle order.
    pub fn checked_columns(&self) -> Vec<&str> {
        self.toggles
            .iter()
            .filter(|t| t.checked)
            .map(|t| t.column.as_str())
            .collect()
    }

    /// Picks a road (or `None` for the road placeholder). Rebuilds the
    /// section options and clears everything downstream.
    pub fn select_road(&mut self, road: Option<&str>) -> Update {
        self.road = road.map(ToString::to_string);
        self.selected = 0;
        self.reset_toggles();

        self.options = vec![SectionOption::placeholder()];
        if let Some(road) = road {
            self.options.extend(
                self.store
                    .index()
                    .sections_for_road(road)
                    .into_iter()
                    .filter(|entry| !entry.is_dead())
                    .map(SectionOption::from),
            );
            debug!("road {road}: {} section(s)", self.options.len() - 1);
        }

        Update::Reset
    }

    /// Picks a section option by position. Position 0 is the placeholder.
    pub fn select_section(&mut self, position: usize) -> Update {
        if position == 0 {
            self.selected = 0;
            self.reset_toggles();
            return Update::Reset;
        }

        let Some(option) = self.options.get(position) else {
            warn!("section option {position} out of range");
            return Update::Unchanged;
        };

        match option.key {
            Some(key) => {
                self.selected = position;
                Update::Redraw {
                    chart: self.chart_for(key),
                    map: Some(MapView::for_section(&self.converter, key)),
                }
            }
            None => {
                let miss = QueryError::MissingSectionKey {
                    label: option.label.clone(),
                };
                debug!("ignoring selection: {miss}");
                Update::Unchanged
            }
        }
    }

    /// Flips a column toggle and redraws the chart for the current section.
    pub fn toggle(&mut self, column: &str) -> Update {
        let Some(toggle) = self.toggles.iter_mut().find(|t| t.column == column) else {
            warn!("unknown column toggle {column}");
            return Update::Unchanged;
        };
        toggle.checked = !toggle.checked;

        match self.current_key() {
            Ok(key) => Update::Redraw {
                chart: self.chart_for(key),
                map: None,
            },
            Err(miss) => {
                debug!("toggle without a section: {miss}");
                Update::Unchanged
            }
        }
    }

    fn current_key(&self) -> Result<SectionKey, QueryError> {
        let option = &self.options[self.selected];
        option.key.ok_or_else(|| QueryError::MissingSectionKey {
            label: option.label.clone(),
        })
    }

    fn chart_for(&self, key: SectionKey) -> Option<ChartData> {
        let series = SeriesExtractor::new(self.store).extract_many(&self.checked_columns(), key);
        ChartData::from_series(&series)
    }

    fn reset_toggles(&mut self) {
        for toggle in &mut self.toggles {
            toggle.checked = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Schema;
    use crate::coords::LatLng;
    use crate::value::FieldValue;

    /// Echoes grid metres back as degrees.
    struct Identity;

    impl GridConverter for Identity {
        fn to_lat_lng(&self, key: SectionKey) -> LatLng {
            LatLng {
                lat: key.northing,
                lng: key.easting,
            }
        }
    }

    fn row(road: &str, start: i64, end: i64, easting: &str, year: i64, cars: i64) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("Road", road.into()),
            ("StartJunction", start.into()),
            ("EndJunction", end.into()),
            ("Easting", easting.into()),
            ("Northing", 2000_i64.into()),
            ("AADFYear", year.into()),
            ("CarsTaxis", cars.into()),
            ("PedalCycles", 7_i64.into()),
        ]
    }

    fn store() -> RecordStore {
        RecordStore::from_rows(
            Schema::default(),
            [
                row("A30", 1, 2, "1000", 2000, 500),
                row("A30", 1, 2, "1000", 2001, 520),
                row("A30", 0, 3, "3000", 2000, 1),
                row("A30", 4, 5, "?", 2000, 1),
                row("M5", 1, 2, "9000", 2000, 900),
            ],
        )
    }

    fn dashboard(store: &RecordStore) -> Dashboard<'_, Identity> {
        Dashboard::new(store, Identity, &["CarsTaxis", "PedalCycles"])
    }

    #[test]
    fn selecting_a_road_lists_live_sections_after_placeholder() {
        let store = store();
        let mut dash = dashboard(&store);
        assert_eq!(dash.select_road(Some("A30")), Update::Reset);

        let labels: Vec<&str> = dash.section_options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, [PLACEHOLDER_LABEL, "1 to 2", "4 to 5"]);
        assert_eq!(dash.section_options()[1].key, Some(SectionKey::new(1000.0, 2000.0)));
    }

    #[test]
    fn selecting_a_section_centres_map_and_draws_nothing_until_toggled() {
        let store = store();
        let mut dash = dashboard(&store);
        dash.select_road(Some("A30"));

        let Update::Redraw { chart, map } = dash.select_section(1) else {
            panic!("expected redraw");
        };
        assert_eq!(chart, None);
        assert_eq!(map.unwrap().center, LatLng { lat: 2000.0, lng: 1000.0 });
    }

    #[test]
    fn toggling_columns_redraws_the_chart() {
        let store = store();
        let mut dash = dashboard(&store);
        dash.select_road(Some("A30"));
        dash.select_section(1);

        dash.toggle("PedalCycles");
        let Update::Redraw { chart, map } = dash.toggle("CarsTaxis") else {
            panic!("expected redraw");
        };
        let chart = chart.unwrap();
        assert_eq!(map, None);
        assert_eq!(chart.labels, ["2000", "2001"]);
        // Toggle order, not click order.
        assert_eq!(chart.datasets[0].label, "CarsTaxis");
        assert_eq!(chart.datasets[0].data, [Some(500.0), Some(520.0)]);
    }

    #[test]
    fn section_without_key_is_a_no_op() {
        let store = store();
        let mut dash = dashboard(&store);
        dash.select_road(Some("A30"));
        dash.select_section(1);

        assert_eq!(dash.select_section(2), Update::Unchanged);
        assert_eq!(dash.selected_section(), 1);
    }

    #[test]
    fn toggle_before_section_changes_nothing_visible() {
        let store = store();
        let mut dash = dashboard(&store);
        dash.select_road(Some("M5"));
        assert_eq!(dash.toggle("CarsTaxis"), Update::Unchanged);
        assert_eq!(dash.checked_columns(), ["CarsTaxis"]);
    }

    #[test]
    fn placeholder_and_new_road_reset_toggles() {
        let store = store();
        let mut dash = dashboard(&store);
        dash.select_road(Some("A30"));
        dash.select_section(1);
        dash.toggle("CarsTaxis");

        assert_eq!(dash.select_section(0), Update::Reset);
        assert!(dash.checked_columns().is_empty());

        dash.select_section(1);
        dash.toggle("CarsTaxis");
        dash.select_road(Some("M5"));
        assert!(dash.checked_columns().is_empty());
        assert_eq!(dash.selected_section(), 0);
        assert_eq!(dash.section_options().len(), 2);
    }

    #[test]
    fn out_of_range_and_unknown_inputs_are_ignored() {
        let store = store();
        let mut dash = dashboard(&store);
        dash.select_road(Some("A30"));
        assert_eq!(dash.select_section(42), Update::Unchanged);
        assert_eq!(dash.toggle("Trams"), Update::Unchanged);
    }

    #[test]
    fn clearing_the_road_leaves_only_placeholder() {
        let store = store();
        let mut dash = dashboard(&store);
        dash.select_road(Some("A30"));
        dash.select_road(None);
        assert_eq!(dash.road(), None);
        assert_eq!(dash.section_options().len(), 1);
        assert_eq!(dash.roads(), ["A30", "M5"]);
    }
}
