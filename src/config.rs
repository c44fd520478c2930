use serde::{Deserialize, Serialize};

/// Top-level compiler input that mirrors the YAML configuration.
///
/// Every section is optional in the YAML document; the only hard requirement
/// (at least one node group, either through `groups` or the `node_count`
/// shorthand) is enforced by the validator so it can be reported together
/// with every other problem.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub defaults: GlobalDefaults,
    #[serde(default)]
    pub overrides: OverrideConfig,
    #[serde(default)]
    pub topology: TopologyConfig,
    /// Flat "number of nodes" shorthand for a single LAN'd group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<NodeGroupSpec>,
}

impl Config {
    /// Largest number of nodes a single configuration may request
    pub const MAX_TOTAL_NODES: usize = 4096;

    /// The node groups to compile, in input order.
    ///
    /// When only the `node_count` shorthand is given it stands for one group
    /// of that size that forms a LAN.
    pub fn node_groups(&self) -> Vec<NodeGroupSpec> {
        match (self.node_count, self.groups.is_empty()) {
            (Some(count), true) => vec![NodeGroupSpec::with_count(count)],
            _ => self.groups.clone(),
        }
    }

    /// Total number of nodes across all groups.
    ///
    /// Non-positive counts add nothing and the sum saturates at `usize::MAX`;
    /// validation rejects anything above [`Config::MAX_TOTAL_NODES`].
    pub fn total_node_count(&self) -> usize {
        self.node_groups()
            .iter()
            .map(NodeGroupSpec::node_count)
            .fold(0usize, usize::saturating_add)
    }
}

/// Free text carried through to the request document
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct GeneralConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Values applied wherever a group or node does not carry its own.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GlobalDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_type: Option<String>,
    /// Link speed in kbps, 0 lets the resource mapper choose
    #[serde(default)]
    pub link_speed: i64,
    /// Ask the mapper to ignore bandwidth constraints on large LANs
    #[serde(default)]
    pub best_effort: bool,
    /// Keep every LAN member on a single switch
    #[serde(default)]
    pub same_switch: bool,
    #[serde(default)]
    pub use_vms: bool,
    #[serde(default)]
    pub start_vnc: bool,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for GlobalDefaults {
    fn default() -> Self {
        Self {
            os_image: None,
            hardware_type: None,
            link_speed: 0,
            best_effort: false,
            same_switch: false,
            use_vms: false,
            start_vnc: false,
            storage: StorageConfig::default(),
        }
    }
}

/// Ephemeral (deleted at teardown) filesystem mounted on every node
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub size_gb: i64,
    /// Allocate all available space instead of `size_gb`
    #[serde(default)]
    pub max_space: bool,
    #[serde(default = "default_mount_point")]
    pub mount_point: String,
}

impl StorageConfig {
    /// Maximum size that may be requested, in GB
    pub const MAX_SIZE_GB: i64 = 200;

    /// Returns true if a volume should be attached to every node
    pub fn is_requested(&self) -> bool {
        self.size_gb > 0 || self.max_space
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            size_gb: 0,
            max_space: false,
            mount_point: default_mount_point(),
        }
    }
}

fn default_mount_point() -> String {
    "/mydata".to_string()
}

/// Per-node override lists and the toggles that enable them.
///
/// A list is only consulted when its "same value for all nodes" toggle is
/// off; it is then indexed by the global node index.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OverrideConfig {
    #[serde(default = "default_true")]
    pub same_os: bool,
    #[serde(default)]
    pub os_images: TokenList,
    #[serde(default = "default_true")]
    pub same_hardware_type: bool,
    #[serde(default)]
    pub hardware_types: TokenList,
}

impl Default for OverrideConfig {
    fn default() -> Self {
        Self {
            same_os: true,
            os_images: TokenList::default(),
            same_hardware_type: true,
            hardware_types: TokenList::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// A list of catalog tokens.
///
/// Accepts either a YAML sequence or a comma-separated string. Entries are
/// trimmed and empty entries dropped; use `"default"` to leave one node unset.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(from = "TokenListRepr", into = "Vec<String>")]
pub struct TokenList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum TokenListRepr {
    List(Vec<String>),
    Joined(String),
}

impl From<TokenListRepr> for TokenList {
    fn from(repr: TokenListRepr) -> Self {
        match repr {
            TokenListRepr::List(items) => TokenList::new(items),
            TokenListRepr::Joined(joined) => TokenList::parse(&joined),
        }
    }
}

impl From<TokenList> for Vec<String> {
    fn from(list: TokenList) -> Self {
        list.0
    }
}

impl TokenList {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            items
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }

    /// Parse the comma-separated form, e.g. `"urn:a, urn:b"`
    pub fn parse(joined: &str) -> Self {
        Self::new(joined.split(','))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

/// How nodes are connected to each other
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    /// Each LAN'd group gets its own link
    #[default]
    PerGroup,
    /// All LAN'd groups share one link
    Shared,
}

/// How node identities are generated
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Naming {
    /// `node<i>` or `vm<i>` by global index
    #[default]
    Sequential,
    /// `<shortSiteName>-<k>` by index within the site
    PerSite,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TopologyConfig {
    #[serde(default)]
    pub connectivity: Connectivity,
    /// Join every node to one extra interconnecting LAN
    #[serde(default)]
    pub backbone: bool,
    #[serde(default)]
    pub naming: Naming,
}

/// A bundle of identical nodes; the unit of declarative input
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NodeGroupSpec {
    pub count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_type: Option<String>,
    /// Site/aggregate identifier, absent lets the backend place anywhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default = "default_true")]
    pub form_lan: bool,
    #[serde(default)]
    pub link: LinkOverrides,
}

impl NodeGroupSpec {
    /// A LAN'd group with every attribute inherited
    pub fn with_count(count: i64) -> Self {
        Self {
            count,
            os_image: None,
            hardware_type: None,
            site: None,
            form_lan: true,
            link: LinkOverrides::default(),
        }
    }

    /// Number of nodes this group produces; zero for invalid counts
    pub fn node_count(&self) -> usize {
        usize::try_from(self.count).unwrap_or(0)
    }
}

/// Link constraints for a group-scoped link, overriding the global defaults
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct LinkOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_speed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_effort: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_switch: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parsing() {
        let yaml = r#"
groups:
  - count: 3
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.groups.len(), 1);
        assert!(config.groups[0].form_lan);
        assert!(config.overrides.same_os);
        assert!(config.overrides.same_hardware_type);
        assert_eq!(config.defaults.storage.mount_point, "/mydata");
        assert_eq!(config.topology.connectivity, Connectivity::PerGroup);
        assert_eq!(config.topology.naming, Naming::Sequential);
        assert_eq!(config.total_node_count(), 3);
    }

    #[test]
    fn test_full_config_parsing() {
        let yaml = r#"
general:
  description: "Two clusters joined by a backbone"
defaults:
  os_image: "urn:publicid:IDN+emulab.net+image+emulab-ops//UBUNTU22-64-STD"
  hardware_type: d430
  link_speed: 1000000
  same_switch: true
  start_vnc: true
  storage:
    size_gb: 50
topology:
  connectivity: per_group
  backbone: true
  naming: per_site
groups:
  - count: 4
    site: "urn:publicid:IDN+utah.cloudlab.us+authority+cm"
    link:
      best_effort: true
  - count: 2
    site: "urn:publicid:IDN+wisc.cloudlab.us+authority+cm"
    hardware_type: c220g5
    form_lan: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.defaults.hardware_type.as_deref(), Some("d430"));
        assert_eq!(config.defaults.link_speed, 1_000_000);
        assert_eq!(config.defaults.storage.size_gb, 50);
        assert!(config.defaults.storage.is_requested());
        assert!(config.topology.backbone);
        assert_eq!(config.topology.naming, Naming::PerSite);
        assert_eq!(config.groups[0].link.best_effort, Some(true));
        assert!(!config.groups[1].form_lan);
        assert_eq!(config.total_node_count(), 6);
    }

    #[test]
    fn test_token_list_forms() {
        let yaml = r#"
same_os: false
os_images: "urn:a, default ,urn:c,"
same_hardware_type: false
hardware_types:
  - d430
  - " m510 "
"#;
        let overrides: OverrideConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(overrides.os_images.as_slice(), &["urn:a", "default", "urn:c"]);
        assert_eq!(overrides.hardware_types.as_slice(), &["d430", "m510"]);
        assert_eq!(overrides.hardware_types.get(1), Some("m510"));
        assert_eq!(overrides.hardware_types.get(2), None);
    }

    #[test]
    fn test_node_count_shorthand() {
        let config: Config = serde_yaml::from_str("node_count: 9").unwrap();
        let groups = config.node_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].count, 9);
        assert!(groups[0].form_lan);
    }

    #[test]
    fn test_total_node_count_saturates() {
        let config = Config {
            groups: vec![NodeGroupSpec::with_count(i64::MAX); 3],
            ..Config::default()
        };
        assert_eq!(config.total_node_count(), usize::MAX);
    }

    #[test]
    fn test_negative_count_produces_no_nodes() {
        let group = NodeGroupSpec::with_count(-2);
        assert_eq!(group.node_count(), 0);
    }

    #[test]
    fn test_storage_not_requested_by_default() {
        assert!(!StorageConfig::default().is_requested());
        let max = StorageConfig {
            max_space: true,
            ..StorageConfig::default()
        };
        assert!(max.is_requested());
    }
}
