//! Static reference data for selectable OS images, hardware types and
//! link speeds.
//!
//! Catalog tokens are opaque to the compiler. The empty token and the token
//! `"default"` both mean "no explicit choice, let the backend decide" and are
//! never carried into a resolved node.

/// One selectable catalog value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Opaque identifier handed to the backend (image URN, hardware code)
    pub token: &'static str,
    /// Human readable label
    pub label: &'static str,
}

const fn entry(token: &'static str, label: &'static str) -> CatalogEntry {
    CatalogEntry { token, label }
}

/// Reserved token meaning "no explicit choice".
pub const DEFAULT_TOKEN: &str = "default";

/// OS images offered for selection.
pub const OS_IMAGES: &[CatalogEntry] = &[
    entry("default", "Default Image"),
    entry("urn:publicid:IDN+cloudlab.umass.edu+image+sfcs-PG0:ztx_ubuntu22", "UBUNTU 22.04 ZTX"),
    entry("urn:publicid:IDN+cloudlab.umass.edu+image+sfcs-PG0:p4_sdn", "P4-SDN UBUNTU22"),
    entry("urn:publicid:IDN+cloudlab.umass.edu+image+sfcs-PG0:BG_QOE_PRED_P4_SDN", "QOE-PRED-P4-SDN"),
    entry("urn:publicid:IDN+emulab.net+image+emulab-ops//UBUNTU22-64-STD", "UBUNTU22-64-STD"),
    entry("urn:publicid:IDN+emulab.net+image+emulab-ops//UBUNTU24-64-BETA", "UBUNTU24-64-BETA"),
    entry("urn:publicid:IDN+cloudlab.umass.edu+image+sfcs-PG0:ubuntu24lts", "UBUNTU 24.04 LTS"),
    entry("urn:publicid:IDN+utah.cloudlab.us+image+sfcs-PG0:sfc_u20_k8s_5g_uth", "UBUNTU 20.04 K8s 5G Utah"),
    entry("urn:publicid:IDN+emulab.net+image+emulab-ops//UBUNTU18-64-STD", "UBUNTU 18.04"),
    entry("urn:publicid:IDN+emulab.net+image+emulab-ops//UBUNTU22-64-ARM", "UBUNTU22-64-ARM"),
    entry("urn:publicid:IDN+emulab.net+image+emulab-ops//UBUNTU20-64-STD", "UBUNTU 20.04"),
    entry("urn:publicid:IDN+emulab.net+image+emulab-ops//UBUNTU16-64-STD", "UBUNTU 16.04"),
    entry("urn:publicid:IDN+emulab.net+image+emulab-ops//CENTOS7-64-STD", "CENTOS 7"),
    entry("urn:publicid:IDN+emulab.net+image+emulab-ops//FBSD112-64-STD", "FreeBSD 11.2"),
];

/// Physical hardware types offered for selection.
pub const HARDWARE_TYPES: &[CatalogEntry] = &[
    entry("", "Any available type"),
    entry("pc3000", "Emulab pc3000"),
    entry("d430", "Emulab d430"),
    entry("d710", "Emulab d710"),
    entry("d820", "Emulab d820"),
    entry("m400", "Utah m400 (ARM)"),
    entry("m510", "Utah m510"),
    entry("xl170", "Utah xl170"),
    entry("c220g1", "Wisconsin c220g1"),
    entry("c220g2", "Wisconsin c220g2"),
    entry("c220g5", "Wisconsin c220g5"),
    entry("c240g5", "Wisconsin c240g5"),
    entry("c6525-25g", "Utah c6525-25g"),
    entry("c6525-100g", "Utah c6525-100g"),
    entry("r320", "APT r320"),
];

/// Selectable link speeds in kbps; `0` lets the resource mapper choose.
pub const LINK_SPEEDS: &[(i64, &str)] = &[
    (0, "Any"),
    (100_000, "100Mb/s"),
    (1_000_000, "1Gb/s"),
    (10_000_000, "10Gb/s"),
    (25_000_000, "25Gb/s"),
    (100_000_000, "100Gb/s"),
];

/// Returns true if `token` means "no explicit choice".
pub fn is_sentinel(token: &str) -> bool {
    let token = token.trim();
    token.is_empty() || token == DEFAULT_TOKEN
}

/// Reduce an optional raw token to a concrete value or `None`.
///
/// Surrounding whitespace is removed, and sentinel tokens collapse to
/// `None` so the literal `"default"` never leaks into a resolved node.
pub fn normalize_token(token: Option<&str>) -> Option<String> {
    match token {
        Some(t) if !is_sentinel(t) => Some(t.trim().to_string()),
        _ => None,
    }
}

/// Find the catalog entry for a token.
pub fn lookup<'a>(catalog: &'a [CatalogEntry], token: &str) -> Option<&'a CatalogEntry> {
    catalog.iter().find(|e| e.token == token)
}

/// Label for a known link speed.
pub fn link_speed_label(speed: i64) -> Option<&'static str> {
    LINK_SPEEDS
        .iter()
        .find(|(kbps, _)| *kbps == speed)
        .map(|(_, label)| *label)
}
