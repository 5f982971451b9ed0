use url::Url;

pub type FarmId = i64;

/// One registered farm server.
///
/// Owned by the directory; immutable for the duration of one dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct FarmRecord {
    pub id: FarmId,
    pub name: String,
    pub url: Url,
    /// Deactivated farms are skipped when selecting "all farms" and
    /// reported as failures when requested explicitly.
    pub active: bool,
}

impl FarmRecord {
    pub fn new<N>(id: FarmId, name: N, url: Url) -> Self
    where
        N: Into<String>,
    {
        FarmRecord {
            id,
            name: name.into(),
            url,
            active: true,
        }
    }
}
