//! National Grid to latitude/longitude conversion for the map marker.
//!
//! Easting/northing are OSGB36 National Grid metres. They are projected back
//! to OSGB36 latitude/longitude with the inverse transverse Mercator series,
//! then shifted to WGS84 with a seven-parameter Helmert transform.

use serde::Serialize;

use crate::record::SectionKey;

/// Zoom level the map opens at for a selected section.
pub const SECTION_ZOOM: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A centred, marked map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl MapView {
    pub fn for_section<C: GridConverter + ?Sized>(converter: &C, key: SectionKey) -> Self {
        Self {
            center: converter.to_lat_lng(key),
            zoom: SECTION_ZOOM,
        }
    }
}

/// Converts a section's grid coordinates into a geographic position.
pub trait GridConverter {
    fn to_lat_lng(&self, key: SectionKey) -> LatLng;
}

struct Ellipsoid {
    a: f64,
    b: f64,
}

impl Ellipsoid {
    fn e2(&self) -> f64 {
        1.0 - (self.b * self.b) / (self.a * self.a)
    }
}

const AIRY_1830: Ellipsoid = Ellipsoid {
    a: 6_377_563.396,
    b: 6_356_256.909,
};

const WGS84: Ellipsoid = Ellipsoid {
    a: 6_378_137.000,
    b: 6_356_752.3142,
};

// National Grid projection constants.
const F0: f64 = 0.999_601_271_7;
const LAT0_DEG: f64 = 49.0;
const LON0_DEG: f64 = -2.0;
const N0: f64 = -100_000.0;
const E0: f64 = 400_000.0;

// Grid coordinates converge in a handful of steps; far-off values stop here.
const MAX_ITERATIONS: usize = 100;

// OSGB36 -> WGS84: translations in metres, scale in ppm, rotations in arcseconds.
const TX: f64 = 446.448;
const TY: f64 = -125.157;
const TZ: f64 = 542.060;
const S_PPM: f64 = -20.4894;
const RX_SEC: f64 = 0.1502;
const RY_SEC: f64 = 0.2470;
const RZ_SEC: f64 = 0.8421;

/// Ordnance Survey National Grid converter producing WGS84 positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsGridConverter;

impl GridConverter for OsGridConverter {
    fn to_lat_lng(&self, key: SectionKey) -> LatLng {
        let osgb36 = grid_to_osgb36(key.easting, key.northing);
        osgb36_to_wgs84(osgb36)
    }
}

fn meridional_arc(lat: f64, lat0: f64) -> f64 {
    let Ellipsoid { a, b } = AIRY_1830;
    let n = (a - b) / (a + b);
    let (n2, n3) = (n * n, n * n * n);
    let d = lat - lat0;
    let s = lat + lat0;

    b * F0
        * ((1.0 + n + 1.25 * n2 + 1.25 * n3) * d
            - (3.0 * n + 3.0 * n2 + 2.625 * n3) * d.sin() * s.cos()
            + (1.875 * n2 + 1.875 * n3) * (2.0 * d).sin() * (2.0 * s).cos()
            - (35.0 / 24.0) * n3 * (3.0 * d).sin() * (3.0 * s).cos())
}

/// Inverse transverse Mercator on the Airy 1830 ellipsoid.
pub fn grid_to_osgb36(easting: f64, northing: f64) -> LatLng {
    let a = AIRY_1830.a;
    let e2 = AIRY_1830.e2();
    let lat0 = LAT0_DEG.to_radians();
    let lon0 = LON0_DEG.to_radians();

    let mut lat = lat0;
    let mut m = 0.0;
    for _ in 0..MAX_ITERATIONS {
        lat += (northing - N0 - m) / (a * F0);
        m = meridional_arc(lat, lat0);
        if (northing - N0 - m).abs() < 0.000_01 {
            break;
        }
    }

    let sin_lat = lat.sin();
    let nu = a * F0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let rho = a * F0 * (1.0 - e2) / (1.0 - e2 * sin_lat * sin_lat).powf(1.5);
    let eta2 = nu / rho - 1.0;

    let tan_lat = lat.tan();
    let t2 = tan_lat * tan_lat;
    let t4 = t2 * t2;
    let t6 = t4 * t2;
    let sec_lat = 1.0 / lat.cos();

    let vii = tan_lat / (2.0 * rho * nu);
    let viii = tan_lat / (24.0 * rho * nu.powi(3)) * (5.0 + 3.0 * t2 + eta2 - 9.0 * t2 * eta2);
    let ix = tan_lat / (720.0 * rho * nu.powi(5)) * (61.0 + 90.0 * t2 + 45.0 * t4);
    let x = sec_lat / nu;
    let xi = sec_lat / (6.0 * nu.powi(3)) * (nu / rho + 2.0 * t2);
    let xii = sec_lat / (120.0 * nu.powi(5)) * (5.0 + 28.0 * t2 + 24.0 * t4);
    let xiia = sec_lat / (5040.0 * nu.powi(7)) * (61.0 + 662.0 * t2 + 1320.0 * t4 + 720.0 * t6);

    let de = easting - E0;
    let lat = lat - vii * de.powi(2) + viii * de.powi(4) - ix * de.powi(6);
    let lng = lon0 + x * de - xi * de.powi(3) + xii * de.powi(5) - xiia * de.powi(7);

    LatLng {
        lat: lat.to_degrees(),
        lng: lng.to_degrees(),
    }
}

/// Shifts an OSGB36 position onto the WGS84 datum.
pub fn osgb36_to_wgs84(position: LatLng) -> LatLng {
    let (x, y, z) = to_cartesian(position, &AIRY_1830);

    let s = S_PPM * 1e-6;
    let rx = (RX_SEC / 3600.0).to_radians();
    let ry = (RY_SEC / 3600.0).to_radians();
    let rz = (RZ_SEC / 3600.0).to_radians();

    let x2 = TX + (1.0 + s) * x - rz * y + ry * z;
    let y2 = TY + rz * x + (1.0 + s) * y - rx * z;
    let z2 = TZ - ry * x + rx * y + (1.0 + s) * z;

    from_cartesian((x2, y2, z2), &WGS84)
}

fn to_cartesian(position: LatLng, ellipsoid: &Ellipsoid) -> (f64, f64, f64) {
    let lat = position.lat.to_radians();
    let lng = position.lng.to_radians();
    let e2 = ellipsoid.e2();
    let nu = ellipsoid.a / (1.0 - e2 * lat.sin().powi(2)).sqrt();

    (
        nu * lat.cos() * lng.cos(),
        nu * lat.cos() * lng.sin(),
        (1.0 - e2) * nu * lat.sin(),
    )
}

fn from_cartesian((x, y, z): (f64, f64, f64), ellipsoid: &Ellipsoid) -> LatLng {
    let e2 = ellipsoid.e2();
    let p = x.hypot(y);

    let mut lat = z.atan2(p * (1.0 - e2));
    for _ in 0..MAX_ITERATIONS {
        let nu = ellipsoid.a / (1.0 - e2 * lat.sin().powi(2)).sqrt();
        let next = (z + e2 * nu * lat.sin()).atan2(p);
        if (next - lat).abs() < 1e-12 {
            lat = next;
            break;
        }
        lat = next;
    }

    LatLng {
        lat: lat.to_degrees(),
        lng: y.atan2(x).to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_projection_matches_ordnance_survey_worked_example() {
        let position = grid_to_osgb36(651_409.903, 313_177.270);
        assert!((position.lat - 52.657_570_3).abs() < 1e-6, "{position:?}");
        assert!((position.lng - 1.717_921_6).abs() < 1e-6, "{position:?}");
    }

    #[test]
    fn false_origin_maps_to_true_origin_longitude() {
        let position = grid_to_osgb36(E0, 0.0);
        assert!((position.lng - LON0_DEG).abs() < 1e-9);
        assert!(position.lat > 49.0 && position.lat < 50.0);
    }

    #[test]
    fn extreme_northing_returns() {
        for northing in [1.7e308, -1.7e308, f64::MAX] {
            let view = MapView::for_section(&OsGridConverter, SectionKey::new(290_000.0, northing));
            assert_eq!(view.zoom, SECTION_ZOOM);
        }
    }

    #[test]
    fn datum_shift_is_small() {
        let osgb36 = grid_to_osgb36(651_409.903, 313_177.270);
        let wgs84 = osgb36_to_wgs84(osgb36);
        assert!((wgs84.lat - osgb36.lat).abs() < 0.005);
        assert!((wgs84.lng - osgb36.lng).abs() < 0.005);
        assert!(wgs84 != osgb36);
    }

    #[test]
    fn map_view_centres_on_converted_section() {
        let view = MapView::for_section(&OsGridConverter, SectionKey::new(290_000.0, 92_000.0));
        assert_eq!(view.zoom, SECTION_ZOOM);
        // Exeter area.
        assert!((view.center.lat - 50.72).abs() < 0.1, "{view:?}");
        assert!((view.center.lng + 3.54).abs() < 0.1, "{view:?}");
    }
}
