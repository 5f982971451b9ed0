use crate::directory::FarmDirectory;
use crate::types::{FarmId, FarmRecord};

/// The resolved target set of one dispatch.
///
/// `farms` are the records that will be contacted, in selection order.
/// Requested ids that resolve to nothing are not silently dropped: missing
/// and deactivated farms are carried alongside so they surface as failures
/// in the response map.
#[derive(Debug, Default, PartialEq)]
pub struct Selection {
    pub farms: Vec<FarmRecord>,
    pub missing: Vec<FarmId>,
    pub inactive: Vec<FarmId>,
}

impl Selection {
    /// Total number of entries the response map will carry.
    pub fn len(&self) -> usize {
        self.farms.len() + self.missing.len() + self.inactive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves an optional id list to concrete farm records.
pub struct FarmSelector<'a> {
    directory: &'a dyn FarmDirectory,
}

impl<'a> FarmSelector<'a> {
    pub fn new(directory: &'a dyn FarmDirectory) -> Self {
        FarmSelector { directory }
    }

    /// Resolve a selection. Absent or empty ids mean "all registered
    /// farms"; deactivated farms are skipped in that case. Explicitly
    /// requested ids are deduplicated, and each resolves to exactly one of
    /// `farms`, `missing` or `inactive`.
    pub async fn resolve(&self, ids: Option<&[FarmId]>) -> Selection {
        let requested = match ids {
            None => return self.all_active().await,
            Some([]) => return self.all_active().await,
            Some(ids) => dedupe(ids),
        };

        let found = self.directory.get_by_ids(&requested).await;
        let mut selection = Selection::default();

        for id in requested {
            match found.iter().find(|farm| farm.id == id) {
                Some(farm) if farm.active => selection.farms.push(farm.clone()),
                Some(farm) => selection.inactive.push(farm.id),
                None => selection.missing.push(id),
            }
        }

        selection
    }

    async fn all_active(&self) -> Selection {
        let farms = self
            .directory
            .get_all()
            .await
            .into_iter()
            .filter(|farm| farm.active)
            .collect();
        Selection {
            farms,
            ..Selection::default()
        }
    }
}

fn dedupe(ids: &[FarmId]) -> Vec<FarmId> {
    let mut seen = Vec::with_capacity(ids.len());
    for &id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}
