//! Las Vegas depots and delivery stops for route-stitching fixtures.
//!
//! Coordinates come from OpenStreetMap and are routable with the OSRM
//! Nevada extract. Stored longitude first, like every `Waypoint`.

use route_stitcher::geo::Waypoint;

/// A named delivery point.
#[derive(Debug, Clone, Copy)]
pub struct Stop {
    pub name: &'static str,
    pub lng: f64,
    pub lat: f64,
}

impl Stop {
    pub const fn new(name: &'static str, lng: f64, lat: f64) -> Self {
        Self { name, lng, lat }
    }

    pub fn waypoint(&self) -> Waypoint {
        Waypoint::new(self.lng, self.lat)
    }
}

/// Casino loading docks used as vehicle depots.
pub const DEPOTS: &[Stop] = &[
    Stop::new("Wynn Las Vegas", -115.1658180, 36.1263781),
    Stop::new("Encore at Wynn", -115.1653620, 36.1289345),
    Stop::new("MGM Grand", -115.1688720, 36.1023654),
    Stop::new("Bellagio", -115.1767, 36.1126),
];

/// Restaurants and venues along the Strip, in no particular order.
pub const DELIVERY_STOPS: &[Stop] = &[
    Stop::new("Hard Rock Cafe", -115.1722166, 36.1041592),
    Stop::new("SW Steakhouse", -115.1669146, 36.1262145),
    Stop::new("Sinatra", -115.1654850, 36.1300035),
    Stop::new("Public House", -115.1689317, 36.1219193),
    Stop::new("Outback Steakhouse Strip", -115.1724577, 36.1037287),
    Stop::new("The Crack Shack", -115.1735287, 36.1050709),
    Stop::new("Brooklyn Bowl", -115.1695094, 36.1175388),
    Stop::new("Flour & Barley", -115.1702674, 36.1173688),
    Stop::new("Yard House", -115.1691992, 36.1177147),
    Stop::new("Gordon Ramsay BurGR", -115.1720818, 36.1107195),
    Stop::new("P.F. Chang's", -115.1723830, 36.1103352),
    Stop::new("Earl of Sandwich Planet Hollywood", -115.1720087, 36.1093912),
    Stop::new("Lobster Me Planet Hollywood", -115.1708325, 36.1094857),
    Stop::new("Gordon Ramsay Steak", -115.1712029, 36.1127744),
    Stop::new("Spago by Wolfgang Puck", -115.1741462, 36.1139368),
    Stop::new("Le Cirque", -115.1749763, 36.1135689),
    Stop::new("BLT Steakhouse", -115.1690095, 36.1135528),
    Stop::new("Guy Fieri's Vegas Kitchen", -115.1722088, 36.1184064),
    Stop::new("Hash House A Go Go", -115.1710989, 36.1181377),
    Stop::new("Ruth's Chris Steak House", -115.1722630, 36.1193113),
    Stop::new("Otto Pizzeria", -115.1684514, 36.1231219),
    Stop::new("Canaletto Ristorante", -115.1688618, 36.1230743),
    Stop::new("Buddy V's", -115.1697093, 36.1231133),
    Stop::new("Carnevino Italian Steakhouse", -115.1687357, 36.1249521),
    Stop::new("Grand Lux Cafe", -115.1685024, 36.1216416),
    Stop::new("Delmonico Steakhouse", -115.1686955, 36.1231561),
    Stop::new("CUT", -115.1682073, 36.1233879),
    Stop::new("Rao's", -115.1763053, 36.1163982),
    Stop::new("Beijing Noodle No. 9", -115.1758038, 36.1158277),
    Stop::new("Bacchanal Buffet", -115.1762929, 36.1159581),
    Stop::new("Mr Chow", -115.1761223, 36.1161158),
    Stop::new("Best Friend", -115.1739173, 36.1049396),
    Stop::new("Il Fornaio", -115.1740110, 36.1024474),
    Stop::new("America", -115.1750921, 36.1021028),
    Stop::new("Emeril's New Orleans Fish House", -115.1688386, 36.1028578),
    Stop::new("Wolfgang Puck Bar & Grill", -115.1696020, 36.1022046),
    Stop::new("L'Atelier De Joel Robuchon", -115.1695890, 36.1026401),
    Stop::new("Charlie Palmer Steak", -115.1743364, 36.0910624),
    Stop::new("Strip Steak", -115.1776176, 36.0908722),
    Stop::new("Marakesh", -115.1546882, 36.1177772),
    Stop::new("Musashi", -115.1545417, 36.1177743),
    Stop::new("Satay", -115.1542982, 36.1182162),
    Stop::new("Coco's Bakery", -115.1652380, 36.1004202),
    Stop::new("Gallagher's", -115.1742518, 36.1025514),
    Stop::new("Denny's Mid Strip", -115.1717620, 36.1209774),
    Stop::new("Tilted Kilt", -115.1705837, 36.1174596),
    Stop::new("Slice of Vegas Pizza", -115.1759954, 36.0944330),
    Stop::new("La La Noodle", -115.1740723, 36.1041828),
];

/// First `count` delivery stops. Panics if more are requested than exist.
pub fn delivery_stops(count: usize) -> &'static [Stop] {
    &DELIVERY_STOPS[..count]
}
