//! Macro for declaring record shapes
//!
//! Generates the [`Record`](crate::core::record::Record) adapter for a struct.

/// Implement [`Record`](crate::core::record::Record) for a serializable struct
///
/// Field names are the serialized names. `id:` marks the identifier field and
/// `refs:` lists reference fields as `field => target` with an optional
/// `as label`.
///
/// # Example
///
/// ```
/// use burrow::impl_record;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// #[serde(rename_all = "PascalCase")]
/// struct Book {
///     id: i64,
///     name: String,
///     library_id: i64,
/// }
///
/// impl_record!(Book, "book", id: "Id", refs: ["LibraryId" => "library" as "owner"]);
///
/// use burrow::core::record::Record;
/// assert_eq!(Book::shape().identifier_field(), Some("Id"));
/// ```
#[macro_export]
macro_rules! impl_record {
    (@label $target:literal) => {
        $target
    };
    (@label $target:literal $label:literal) => {
        $label
    };
    (
        $type:ident,
        $name:literal
        $(, id: $id:literal)?
        $(, refs: [ $( $field:literal => $target:literal $(as $label:literal)? ),* $(,)? ])?
        $(,)?
    ) => {
        impl $crate::core::record::Record for $type {
            fn shape() -> $crate::core::record::RecordShape {
                #[allow(unused_mut)]
                let mut shape = $crate::core::record::RecordShape::new($name);
                $( shape = shape.identifier($id); )?
                $( $(
                    shape = shape.reference_as(
                        $field,
                        $target,
                        $crate::impl_record!(@label $target $($label)?),
                    );
                )* )?
                shape
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::record::{Record, ReferenceField};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Loan {
        id: i64,
        book_id: i64,
        member_id: i64,
    }

    impl_record!(Note, "Note");
    impl_record!(Loan, "loan", id: "Id", refs: [
        "BookId" => "book",
        "MemberId" => "member" as "borrower",
    ]);

    #[test]
    fn test_shape_without_annotations() {
        let shape = Note::shape();
        assert_eq!(shape.name(), "note");
        assert_eq!(shape.identifier_field(), None);
        assert!(shape.reference_fields().is_empty());
    }

    #[test]
    fn test_shape_with_references() {
        let shape = Loan::shape();
        assert_eq!(shape.identifier_field(), Some("Id"));
        assert_eq!(
            shape.reference_fields(),
            vec![
                ReferenceField {
                    target: "book",
                    label: "book",
                    field: "BookId",
                },
                ReferenceField {
                    target: "member",
                    label: "borrower",
                    field: "MemberId",
                },
            ]
        );
        assert!(shape.validate().is_ok());
    }
}
