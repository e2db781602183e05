//! Field packer.
//!
//! Groups an ordered field list into wire chunks. Consecutive `bit` fields
//! share one byte, up to eight per byte; everything else is one chunk per
//! field. Fields are never reordered.

use framegen_spec::{
    MAX_BIT_GROUP, SpecError,
    node::{Field, FieldList, Spec},
    types::WireType,
};

///
/// BitGroup
///
/// Up to eight consecutive boolean fields sharing one byte.
/// Member `i` lives in bit `i`, counting from the least significant bit.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BitGroup<'a> {
    start: usize,
    fields: Vec<&'a Field>,
}

impl<'a> BitGroup<'a> {
    fn new(first: &'a Field) -> Self {
        Self {
            start: first.index(),
            fields: vec![first],
        }
    }

    /// Position index of the first member.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub fn fields(&self) -> &[&'a Field] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.fields.len() == MAX_BIT_GROUP
    }
}

///
/// WireChunk
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WireChunk<'a> {
    FixedWidth { field: &'a Field, ty: WireType },
    VariableWidth { field: &'a Field, ty: WireType },
    BitGroup(BitGroup<'a>),
}

impl<'a> WireChunk<'a> {
    /// The fields this chunk carries, in wire order.
    #[must_use]
    pub fn fields(&self) -> Vec<&'a Field> {
        match self {
            Self::FixedWidth { field, .. } | Self::VariableWidth { field, .. } => vec![*field],
            Self::BitGroup(group) => group.fields.clone(),
        }
    }
}

/// Resolve every field's wire type, keeping declaration order.
pub fn classify<'a>(
    spec: &Spec,
    fields: &'a FieldList,
) -> Result<Vec<(&'a Field, WireType)>, SpecError> {
    fields
        .iter()
        .map(|field| spec.field_type(field).map(|ty| (field, ty)))
        .collect()
}

/// Coalesce classified fields into chunks.
///
/// A bit group is closed by reaching eight members or by a non-bit field.
#[must_use]
pub fn coalesce<'a>(classified: impl IntoIterator<Item = (&'a Field, WireType)>) -> Vec<WireChunk<'a>> {
    let mut chunks = Vec::new();
    let mut open: Option<BitGroup<'a>> = None;

    for (field, ty) in classified {
        if ty.is_bit() {
            let has_room = open.as_ref().is_some_and(|group| !group.is_full());

            match open.as_mut() {
                Some(group) if has_room => group.fields.push(field),
                _ => {
                    if let Some(full) = open.replace(BitGroup::new(field)) {
                        chunks.push(WireChunk::BitGroup(full));
                    }
                }
            }

            continue;
        }

        if let Some(group) = open.take() {
            chunks.push(WireChunk::BitGroup(group));
        }

        if ty.fixed_width().is_some() {
            chunks.push(WireChunk::FixedWidth { field, ty });
        } else {
            chunks.push(WireChunk::VariableWidth { field, ty });
        }
    }

    if let Some(group) = open {
        chunks.push(WireChunk::BitGroup(group));
    }

    chunks
}

/// Classify then coalesce a field list.
pub fn pack_fields<'a>(spec: &Spec, fields: &'a FieldList) -> Result<Vec<WireChunk<'a>>, SpecError> {
    Ok(coalesce(classify(spec, fields)?))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use framegen_spec::node::Version;
    use proptest::prelude::*;

    fn spec() -> Spec {
        Spec::new(Version::new(0, 9, 1), 5672).with_domain("flag", "bit")
    }

    fn fields(domains: &[&str]) -> FieldList {
        domains
            .iter()
            .enumerate()
            .map(|(i, domain)| Field::new(format!("f{i}"), *domain))
            .collect()
    }

    fn shape(chunks: &[WireChunk<'_>]) -> Vec<String> {
        chunks
            .iter()
            .map(|chunk| match chunk {
                WireChunk::FixedWidth { field, .. } => format!("fixed@{}", field.index()),
                WireChunk::VariableWidth { field, .. } => format!("var@{}", field.index()),
                WireChunk::BitGroup(group) => format!("bits@{}x{}", group.start(), group.len()),
            })
            .collect()
    }

    #[test]
    fn consecutive_bits_share_a_group() {
        let list = fields(&["bit", "flag", "shortstr"]);
        let chunks = pack_fields(&spec(), &list).unwrap();

        assert_eq!(shape(&chunks), vec!["bits@0x2", "var@2"]);
    }

    #[test]
    fn ninth_bit_opens_a_new_group() {
        let list = fields(&["bit"; 9]);
        let chunks = pack_fields(&spec(), &list).unwrap();

        assert_eq!(shape(&chunks), vec!["bits@0x8", "bits@8x1"]);
    }

    #[test]
    fn non_bit_field_closes_the_open_group() {
        let list = fields(&["octet", "bit", "bit", "short", "bit", "longstr", "table"]);
        let chunks = pack_fields(&spec(), &list).unwrap();

        assert_eq!(
            shape(&chunks),
            vec!["fixed@0", "bits@1x2", "fixed@3", "bits@4x1", "var@5", "var@6"]
        );
    }

    #[test]
    fn empty_list_packs_to_nothing() {
        let list = FieldList::new();

        assert!(pack_fields(&spec(), &list).unwrap().is_empty());
    }

    #[test]
    fn unknown_domain_aborts_packing() {
        let list = fields(&["octet", "mystery"]);

        let err = pack_fields(&spec(), &list).unwrap_err();
        assert!(matches!(err, SpecError::UnknownDomain(d) if d == "mystery"));
    }

    fn arb_domains() -> impl Strategy<Value = Vec<&'static str>> {
        prop::collection::vec(
            prop_oneof![
                4 => Just("bit"),
                1 => Just("flag"),
                1 => Just("octet"),
                1 => Just("longlong"),
                1 => Just("shortstr"),
                1 => Just("table"),
            ],
            0..40,
        )
    }

    proptest! {
        #[test]
        fn chunks_reproduce_the_field_sequence(domains in arb_domains()) {
            let list = fields(&domains);
            let chunks = pack_fields(&spec(), &list).unwrap();

            let flattened: Vec<usize> = chunks
                .iter()
                .flat_map(WireChunk::fields)
                .map(Field::index)
                .collect();
            let expected: Vec<usize> = (0..domains.len()).collect();

            prop_assert_eq!(flattened, expected);
        }

        #[test]
        fn bit_groups_hold_at_most_eight_contiguous_members(domains in arb_domains()) {
            let list = fields(&domains);
            let chunks = pack_fields(&spec(), &list).unwrap();

            for chunk in &chunks {
                if let WireChunk::BitGroup(group) = chunk {
                    prop_assert!(!group.is_empty() && group.len() <= MAX_BIT_GROUP);
                    for (offset, field) in group.fields().iter().enumerate() {
                        prop_assert_eq!(field.index(), group.start() + offset);
                    }
                }
            }
        }

        #[test]
        fn a_group_is_only_followed_by_another_group_when_full(domains in arb_domains()) {
            let list = fields(&domains);
            let chunks = pack_fields(&spec(), &list).unwrap();

            for pair in chunks.windows(2) {
                if let (WireChunk::BitGroup(first), WireChunk::BitGroup(_)) = (&pair[0], &pair[1]) {
                    prop_assert!(first.is_full());
                }
            }
        }

        #[test]
        fn packing_is_deterministic(domains in arb_domains()) {
            let list = fields(&domains);

            prop_assert_eq!(
                pack_fields(&spec(), &list).unwrap(),
                pack_fields(&spec(), &list).unwrap()
            );
        }
    }
}
