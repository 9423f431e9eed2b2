//! Pure list helpers behind field reordering and step removal.

use formwright_core::{AppError, AppResult};

use crate::field::FormField;

/// Moves the item at `from` to `to`, shifting the items in between.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> AppResult<()> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(AppError::Validation(format!(
            "cannot move item from {from} to {to} in a list of {len}"
        )));
    }

    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

/// Deletes the fields on `removed_step` and shifts fields above it down by one.
///
/// Fields below the removed step and unstepped fields are kept as they are.
/// Returns the deleted fields in their former display order.
pub fn close_step_gap(fields: &mut Vec<FormField>, removed_step: u32) -> Vec<FormField> {
    let (removed, kept): (Vec<FormField>, Vec<FormField>) = std::mem::take(fields)
        .into_iter()
        .partition(|field| field.step() == Some(removed_step));

    *fields = kept;
    for field in fields.iter_mut() {
        if let Some(step) = field.step().filter(|step| *step > removed_step) {
            field.set_step(Some(step - 1));
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{close_step_gap, move_item};
    use crate::field::{FieldType, FormField, FormFieldInput};

    fn stepped(id: usize, step: u32) -> FormField {
        FormField::new(FormFieldInput {
            step: Some(step),
            ..FormFieldInput::new(format!("f{id}"), FieldType::Text, "Field")
        })
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn move_item_shifts_intermediate_items() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        assert!(move_item(&mut items, 0, 2).is_ok());
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);

        assert!(move_item(&mut items, 3, 0).is_ok());
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn move_item_rejects_out_of_range_indices() {
        let mut items = vec![1, 2, 3];
        assert!(move_item(&mut items, 3, 0).is_err());
        assert!(move_item(&mut items, 0, 3).is_err());
        assert_eq!(items, vec![1, 2, 3]);

        let mut empty: Vec<u8> = Vec::new();
        assert!(move_item(&mut empty, 0, 0).is_err());
    }

    #[test]
    fn close_step_gap_deletes_and_renumbers() {
        let mut fields = vec![stepped(0, 1), stepped(1, 2), stepped(2, 3), stepped(3, 2)];
        let removed = close_step_gap(&mut fields, 2);

        assert_eq!(removed.len(), 2);
        let remaining: Vec<(&str, Option<u32>)> = fields
            .iter()
            .map(|field| (field.id().as_str(), field.step()))
            .collect();
        assert_eq!(remaining, vec![("f0", Some(1)), ("f2", Some(2))]);
    }

    proptest! {
        #[test]
        fn move_then_move_back_restores_order(
            len in 1usize..20,
            from_seed in any::<usize>(),
            to_seed in any::<usize>(),
        ) {
            let original: Vec<usize> = (0..len).collect();
            let from = from_seed % len;
            let to = to_seed % len;
            let mut items = original.clone();

            prop_assert!(move_item(&mut items, from, to).is_ok());
            prop_assert!(move_item(&mut items, to, from).is_ok());
            prop_assert_eq!(items, original);
        }

        #[test]
        fn close_step_gap_only_touches_fields_on_or_above_the_step(
            steps in proptest::collection::vec(1u32..6, 0..24),
            removed_step in 1u32..6,
        ) {
            let original: Vec<FormField> = steps
                .iter()
                .enumerate()
                .map(|(index, step)| stepped(index, *step))
                .collect();
            let mut fields = original.clone();
            close_step_gap(&mut fields, removed_step);

            let removed_step_is_empty = fields.iter().all(|field| {
                original
                    .iter()
                    .find(|before| before.id() == field.id())
                    .is_some_and(|before| before.step() != Some(removed_step))
            });
            prop_assert!(removed_step_is_empty);

            let survivors: Vec<&FormField> = original
                .iter()
                .filter(|field| field.step() != Some(removed_step))
                .collect();
            prop_assert_eq!(survivors.len(), fields.len());

            for (before, after) in survivors.into_iter().zip(fields.iter()) {
                prop_assert_eq!(before.id(), after.id());
                let before_step = before.step().unwrap_or_default();
                let expected = if before_step > removed_step {
                    before_step - 1
                } else {
                    before_step
                };
                prop_assert_eq!(after.step(), Some(expected));
            }
        }
    }
}
