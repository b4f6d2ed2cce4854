use aadf_data::{
    ChartData, Dashboard, FieldValue, LatLng, GridConverter, QueryError, RecordStore, Schema,
    SectionKey, SeriesExtractor, Update,
};

struct Flat;

impl GridConverter for Flat {
    fn to_lat_lng(&self, key: SectionKey) -> LatLng {
        LatLng {
            lat: key.northing / 1000.0,
            lng: key.easting / 1000.0,
        }
    }
}

fn a30_row(year: i64, cars: i64) -> Vec<(&'static str, FieldValue)> {
    vec![
        ("Road", "A30".into()),
        ("StartJunction", 1_i64.into()),
        ("EndJunction", 2_i64.into()),
        ("Easting", 1000_i64.into()),
        ("Northing", 2000_i64.into()),
        ("AADFYear", year.into()),
        ("Cars", cars.into()),
    ]
}

fn two_year_store() -> RecordStore {
    RecordStore::from_rows(Schema::default(), [a30_row(2000, 500), a30_row(2001, 520)])
}

#[test]
fn two_rows_give_one_section_and_a_two_year_series() {
    let store = two_year_store();

    let sections = store.index().sections_for_road("A30");
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].key, Some(SectionKey::new(1000.0, 2000.0)));

    let series = SeriesExtractor::new(&store)
        .extract("Cars", SectionKey::new(1000.0, 2000.0))
        .unwrap();
    assert_eq!(series.years, [FieldValue::Number(2000.0), FieldValue::Number(2001.0)]);
    assert_eq!(series.values, [Some(500.0), Some(520.0)]);
    assert_eq!(series.start_junction, FieldValue::Number(1.0));
}

#[test]
fn unknown_coordinates_are_an_empty_selection() {
    let store = two_year_store();
    let key = SectionKey::new(4.0, 2.0);
    assert_eq!(
        SeriesExtractor::new(&store).extract("Cars", key),
        Err(QueryError::EmptySelection(key))
    );
    assert!(SeriesExtractor::new(&store).extract_many(&["Cars", "Vans"], key).is_empty());
}

#[test]
fn canonical_year_is_configurable() {
    let store = RecordStore::from_rows(
        Schema::default().with_canonical_year(2001),
        [a30_row(2000, 500), a30_row(2001, 520)],
    );
    assert_eq!(store.index().sections().len(), 1);

    let later = RecordStore::from_rows(
        Schema::default().with_canonical_year(2010),
        [a30_row(2000, 500), a30_row(2001, 520)],
    );
    // The section still has data but is invisible to the pickers.
    assert!(later.index().sections_for_road("A30").is_empty());
    assert_eq!(later.query(SectionKey::new(1000.0, 2000.0)).len(), 2);
}

#[test]
fn dashboard_flow_from_road_to_chart() {
    let store = two_year_store();
    let mut dash = Dashboard::new(&store, Flat, &["Cars", "Vans"]);

    assert_eq!(dash.roads(), ["A30"]);
    dash.select_road(Some("A30"));
    assert_eq!(dash.section_options()[1].label, "1 to 2");

    let Update::Redraw { map, .. } = dash.select_section(1) else {
        panic!("expected redraw");
    };
    assert_eq!(map.unwrap().center, LatLng { lat: 2.0, lng: 1.0 });

    dash.toggle("Vans");
    let Update::Redraw { chart: Some(chart), .. } = dash.toggle("Cars") else {
        panic!("expected chart");
    };

    let expected = ChartData::from_series(
        &SeriesExtractor::new(&store).extract_many(&["Cars", "Vans"], SectionKey::new(1000.0, 2000.0)),
    )
    .unwrap();
    assert_eq!(chart, expected);
    // Unknown column: the series exists but has only gaps.
    assert_eq!(chart.datasets[1].data, [None, None]);
}
