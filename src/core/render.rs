use crate::domain::model::{DetailRow, GeoLocation};

/// 組出詳細資訊列，依固定順序，略過缺少或空白的欄位
pub fn detail_rows(location: &GeoLocation) -> Vec<DetailRow> {
    let fields: [(&'static str, Option<&str>); 8] = [
        ("IP Address", location.ip.as_deref()),
        ("City", location.city.as_deref()),
        ("Region", location.region.as_deref()),
        ("Country", location.country_name.as_deref()),
        ("Organization", location.org.as_deref()),
        ("ASN", location.asn.as_deref()),
        ("Postal Code", location.postal.as_deref()),
        ("Timezone", location.timezone.as_deref()),
    ];

    let mut rows: Vec<DetailRow> = fields
        .into_iter()
        .filter_map(|(label, value)| {
            let value = value?.trim();
            if value.is_empty() {
                None
            } else {
                Some(DetailRow {
                    label,
                    value: value.to_string(),
                })
            }
        })
        .collect();

    if let Some(coordinates) = location.coordinates() {
        rows.push(DetailRow {
            label: "Coordinates",
            value: coordinates.to_string(),
        });
    }

    rows
}

/// Marker popup: "city, country" when known, else the IP, else the coordinates.
pub fn popup_text(location: &GeoLocation) -> String {
    let place: Vec<&str> = [location.city.as_deref(), location.country_name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if !place.is_empty() {
        return place.join(", ");
    }

    match (location.ip.as_deref(), location.coordinates()) {
        (Some(ip), _) if !ip.trim().is_empty() => ip.trim().to_string(),
        (_, Some(coordinates)) => coordinates.to_string(),
        _ => String::new(),
    }
}
