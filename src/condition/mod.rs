mod arn;
mod binary;
mod boolean;
mod clause;
mod date;
mod ipaddr;
mod key;
mod null;
mod numeric;

#[allow(non_upper_case_globals)]
pub mod op;

mod operator;
mod string;
mod value;
mod variant;

pub use {
    clause::{build_condition, build_typed_condition, ConditionClause},
    date::{format_date, parse_date},
    key::{ConditionKey, ConditionKeyType},
    op::ConditionOp,
    operator::{Operator, SetOperator},
    value::ConditionValue,
};

use {
    crate::{from_str_json, serutil::StringLikeList},
    log::trace,
    serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        borrow::Borrow,
        collections::{
            btree_map::{IntoIter, Iter, Keys, Values},
            BTreeMap,
        },
        ops::Index,
    },
};

pub type ConditionMap = BTreeMap<String, StringLikeList<String>>;

/// Indicates whether a value refers to a policy variable such as `${aws:username}`.
pub(crate) fn has_policy_variable(value: &str) -> bool {
    match value.find("${") {
        Some(start) => value[start..].contains('}'),
        None => false,
    }
}

/// The `Condition` block of a statement: operator -> condition key -> values.
///
/// A condition key appears under at most one operator; [Condition::insert_clause] replaces any earlier entry for
/// the same key, whichever operator it was under.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Condition {
    map: BTreeMap<Operator, ConditionMap>,
}

from_str_json!(Condition);

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::deserialize(deserializer)?;

        Ok(Self {
            map,
        })
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}

impl Condition {
    #[inline]
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Add a clause, replacing any existing value for its key under any operator.
    pub fn insert_clause(&mut self, clause: ConditionClause) {
        let (key, operator, values) = clause.into_parts();

        if let Some((previous, _)) = self.remove_key(&key) {
            trace!("Condition key {key} moves from {previous} to {operator}");
        }

        self.map.entry(operator).or_default().insert(key, values.into_values());
    }

    /// Find a condition key, returning the operator it is under and its values.
    pub fn get_key(&self, key: &str) -> Option<(&Operator, &StringLikeList<String>)> {
        self.map.iter().find_map(|(op, cmap)| cmap.get(key).map(|values| (op, values)))
    }

    /// Remove a condition key from every operator holding it, returning the first entry removed. Operators left
    /// without keys are dropped.
    pub fn remove_key(&mut self, key: &str) -> Option<(Operator, StringLikeList<String>)> {
        let mut removed = None;

        for (op, cmap) in self.map.iter_mut() {
            if let Some(values) = cmap.remove(key) {
                if removed.is_none() {
                    removed = Some((*op, values));
                }
            }
        }

        self.map.retain(|_, cmap| !cmap.is_empty());
        removed
    }

    #[inline]
    pub fn clear(&mut self) {
        self.map.clear();
    }

    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Operator: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.contains_key(key)
    }

    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&ConditionMap>
    where
        Operator: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.get(key)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, Operator, ConditionMap> {
        self.map.iter()
    }

    #[inline]
    pub fn keys(&self) -> Keys<'_, Operator, ConditionMap> {
        self.map.keys()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn values(&self) -> Values<'_, Operator, ConditionMap> {
        self.map.values()
    }
}

impl Default for Condition {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<ConditionClause> for Condition {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = ConditionClause>,
    {
        let mut condition = Condition::new();
        for clause in iter {
            condition.insert_clause(clause);
        }
        condition
    }
}

impl<Q> Index<&Q> for Condition
where
    Operator: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = ConditionMap;

    fn index(&self, key: &Q) -> &ConditionMap {
        self.map.index(key)
    }
}

impl<'a> IntoIterator for &'a Condition {
    type Item = (&'a Operator, &'a ConditionMap);
    type IntoIter = Iter<'a, Operator, ConditionMap>;
    fn into_iter(self) -> Iter<'a, Operator, ConditionMap> {
        self.map.iter()
    }
}

impl IntoIterator for Condition {
    type Item = (Operator, ConditionMap);
    type IntoIter = IntoIter<Operator, ConditionMap>;
    fn into_iter(self) -> IntoIter<Operator, ConditionMap> {
        self.map.into_iter()
    }
}
