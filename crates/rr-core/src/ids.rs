//! Identifier newtypes for server-issued ids.

use serde::{Deserialize, Serialize};

macro_rules! impl_id {
    ($($name:ident),* $(,)?) => {
        $(
            impl $name {
                pub fn from_string(s: String) -> Self {
                    Self(s)
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }

                pub fn into_inner(self) -> String {
                    self.0
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<String> for $name {
                fn from(s: String) -> Self {
                    Self(s)
                }
            }

            impl From<&str> for $name {
                fn from(s: &str) -> Self {
                    Self(s.to_string())
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }
        )*
    };
}

/// Objective id as issued by the rewards API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectiveId(String);

/// Campaign an objective belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(String);

impl_id!(ObjectiveId, CampaignId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_inner_value() {
        let id = ObjectiveId::from("obj-1");
        assert_eq!(id.to_string(), "obj-1");
        assert_eq!(CampaignId::from_string("c-9".into()).as_str(), "c-9");
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&CampaignId::from("c-1")).unwrap();
        assert_eq!(json, "\"c-1\"");
    }
}
