//! Height-balanced satellite registry
use serde::Serialize;
use satnet_common::{AltitudeBand, InclinationBand, SatId, SatState, Satellite};

use super::error::InvariantViolation;
use super::iter::Iter;
use super::node::{self, Link};

/// Height-balanced (AVL) registry of satellites keyed by id.
///
/// Every operation is O(log n) except the full traversals
/// ([`count_satellites`](Self::count_satellites), listing, purge).
#[derive(Debug, Default)]
pub struct SatNet {
    root: Link,
    len: usize,
}

/// One line of [`SatNet::list_satellites`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SatelliteListing {
    pub id: SatId,
    pub state: SatState,
    pub inclin: InclinationBand,
    pub alt: AltitudeBand,
}

impl From<&Satellite> for SatelliteListing {
    fn from(sat: &Satellite) -> Self {
        Self {
            id: sat.id(),
            state: sat.state,
            inclin: sat.inclin,
            alt: sat.alt,
        }
    }
}

impl std::fmt::Display for SatelliteListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}: {}", self.id, self.state, self.inclin, self.alt)
    }
}

impl SatNet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of satellites in the registry
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree; 0 when empty
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Insert a satellite.
    ///
    /// Returns `false` and keeps the stored record if the id is already present.
    pub fn insert(&mut self, sat: Satellite) -> bool {
        let id = sat.id();
        let (root, inserted) = node::insert(self.root.take(), sat);
        self.root = Some(root);

        if inserted {
            self.len += 1;
        } else {
            tracing::debug!("Satellite {} already registered, insert ignored", id);
        }
        inserted
    }

    /// Remove a satellite by id, returning its record if it was present.
    pub fn remove(&mut self, id: SatId) -> Option<Satellite> {
        let (root, removed) = node::remove(self.root.take(), id);
        self.root = root;

        if removed.is_some() {
            self.len -= 1;
            tracing::debug!("Satellite {} removed", id);
        }
        removed
    }

    pub fn find_satellite(&self, id: SatId) -> bool {
        node::find(&self.root, id).is_some()
    }

    pub fn get(&self, id: SatId) -> Option<&Satellite> {
        node::find(&self.root, id).map(|n| &n.sat)
    }

    /// Change the state of a satellite. Returns `false` if the id is unknown.
    pub fn set_state(&mut self, id: SatId, state: SatState) -> bool {
        match node::find_mut(&mut self.root, id) {
            Some(node) => {
                node.sat.state = state;
                true
            }
            None => false,
        }
    }

    /// Count satellites in the given inclination band (visits every node)
    pub fn count_satellites(&self, band: InclinationBand) -> usize {
        self.iter().filter(|sat| sat.inclin == band).count()
    }

    /// In-order (ascending id) listing
    pub fn list_satellites(&self) -> Vec<SatelliteListing> {
        self.iter().map(SatelliteListing::from).collect()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root)
    }

    /// Remove every deorbited satellite. Returns how many were removed.
    ///
    /// Ids are gathered bottom-up first, then each goes through [`remove`](Self::remove),
    /// so the tree stays balanced however many siblings are purged together.
    pub fn remove_deorbited(&mut self) -> usize {
        let mut ids = Vec::new();
        node::collect_deorbited(&self.root, &mut ids);

        let mut removed = 0;
        for id in ids {
            if self.remove(id).is_some() {
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::info!("Removed {} deorbited satellites, {} remain", removed, self.len);
        }
        removed
    }

    /// Replace the contents of `self` with a deep copy of `other`.
    ///
    /// The old nodes are released before the copy is made. The copy shares
    /// nothing with `other`; cached heights are carried over as-is.
    pub fn assign(&mut self, other: &SatNet) {
        self.clear();
        self.root = other.root.clone();
        self.len = other.len;
    }

    /// Release every node
    pub fn clear(&mut self) {
        let freed = node::release(self.root.take());
        self.len = 0;
        if freed > 0 {
            tracing::debug!("Cleared {} satellites", freed);
        }
    }

    /// Check order, cached heights, balance and length across the whole tree.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let (_, count) = validate_subtree(&self.root, None, None)?;
        if count != self.len {
            return Err(InvariantViolation::LengthMismatch {
                cached: self.len,
                actual: count,
            });
        }
        Ok(())
    }
}

/// Returns the recomputed height and node count of the subtree.
fn validate_subtree(
    link: &Link,
    lower: Option<SatId>,
    upper: Option<SatId>,
) -> Result<(usize, usize), InvariantViolation> {
    let Some(node) = link else {
        return Ok((0, 0));
    };
    let id = node.id();

    if let Some(parent) = lower.filter(|&lo| id <= lo) {
        return Err(InvariantViolation::OutOfOrder { parent, child: id });
    }
    if let Some(parent) = upper.filter(|&hi| id >= hi) {
        return Err(InvariantViolation::OutOfOrder { parent, child: id });
    }

    let (left_height, left_count) = validate_subtree(&node.left, lower, Some(id))?;
    let (right_height, right_count) = validate_subtree(&node.right, Some(id), upper)?;

    let actual = 1 + left_height.max(right_height);
    if node.height != actual {
        return Err(InvariantViolation::HeightMismatch {
            id,
            cached: node.height,
            actual,
        });
    }

    let balance = left_height as isize - right_height as isize;
    if balance.abs() > 1 {
        return Err(InvariantViolation::Unbalanced { id, balance });
    }

    Ok((actual, left_count + right_count + 1))
}

impl Clone for SatNet {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl Drop for SatNet {
    fn drop(&mut self) {
        node::release(self.root.take());
    }
}

impl<'a> IntoIterator for &'a SatNet {
    type Item = &'a Satellite;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Satellite> for SatNet {
    fn from_iter<T: IntoIterator<Item = Satellite>>(iter: T) -> Self {
        let mut net = SatNet::new();
        for sat in iter {
            net.insert(sat);
        }
        net
    }
}
