use taxon_model::RowView;
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  NodeRef,
  Properties,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_node_ref
};

use super::RowRef;

#[derive(Properties, PartialEq)]
pub struct CategoryRowProps {
  pub row:       RowView,
  pub on_edit:   Callback<RowRef>,
  pub on_delete: Callback<RowRef>,
  pub on_save:   Callback<RowRef>,
  pub on_cancel: Callback<RowRef>,
  pub on_draft:  Callback<String>
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKeyAction {
  Save,
  Cancel
}

/// Enter saves and Escape cancels while the row input has
/// focus.
pub fn row_key_action(
  key: &str
) -> Option<RowKeyAction> {
  match key {
    | "Enter" => Some(RowKeyAction::Save),
    | "Escape" => Some(RowKeyAction::Cancel),
    | _ => None
  }
}

#[function_component(CategoryRow)]
pub fn category_row(
  props: &CategoryRowProps
) -> Html {
  let input_ref = use_node_ref();
  let editing = props.row.is_editing();

  {
    let input_ref: NodeRef =
      input_ref.clone();
    use_effect_with(editing, move |editing| {
      if *editing
        && let Some(input) = input_ref
          .cast::<HtmlInputElement>()
      {
        let _ = input.focus();
        input.select();
      }
      || ()
    });
  }

  let row_ref: RowRef = (
    props.row.kind,
    props.row.id.clone()
  );

  if editing {
    let on_draft = props.on_draft.clone();
    let oninput =
      Callback::from(move |e: web_sys::InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_draft.emit(input.value());
      });

    let onkeydown = {
      let on_save = props.on_save.clone();
      let on_cancel =
        props.on_cancel.clone();
      let row_ref = row_ref.clone();
      Callback::from(move |e: web_sys::KeyboardEvent| {
        match row_key_action(&e.key()) {
          | Some(RowKeyAction::Save) => {
            e.prevent_default();
            on_save.emit(row_ref.clone());
          }
          | Some(RowKeyAction::Cancel) => {
            e.stop_propagation();
            on_cancel.emit(row_ref.clone());
          }
          | None => {}
        }
      })
    };

    let on_save = {
      let on_save = props.on_save.clone();
      let row_ref = row_ref.clone();
      Callback::from(move |_: yew::MouseEvent| {
        on_save.emit(row_ref.clone())
      })
    };
    let on_cancel = {
      let on_cancel =
        props.on_cancel.clone();
      let row_ref = row_ref.clone();
      Callback::from(move |_: yew::MouseEvent| {
        on_cancel.emit(row_ref.clone())
      })
    };

    return html! {
        <tr class="editing" data-id={props.row.id.clone()} data-type={props.row.kind.as_key()}>
            <td>
                <input
                    ref={input_ref}
                    type="text"
                    class="category-name editing"
                    value={props.row.display_name().to_string()}
                    oninput={oninput}
                    onkeydown={onkeydown}
                />
            </td>
            <td>
                <div class="actions">
                    <button type="button" class="save-btn" onclick={on_save}>{ "Save" }</button>
                    <button type="button" class="cancel-btn" onclick={on_cancel}>{ "Cancel" }</button>
                </div>
            </td>
        </tr>
    };
  }

  let on_edit = {
    let on_edit = props.on_edit.clone();
    let row_ref = row_ref.clone();
    Callback::from(move |_: yew::MouseEvent| {
      on_edit.emit(row_ref.clone())
    })
  };
  let on_delete = {
    let on_delete = props.on_delete.clone();
    Callback::from(move |_: yew::MouseEvent| {
      on_delete.emit(row_ref.clone())
    })
  };

  html! {
      <tr data-id={props.row.id.clone()} data-type={props.row.kind.as_key()}>
          <td><span class="category-name">{ props.row.display_name() }</span></td>
          <td>
              <div class="actions">
                  <button type="button" class="edit-btn" onclick={on_edit}>{ "Edit" }</button>
                  <button type="button" class="delete-btn" onclick={on_delete}>{ "Delete" }</button>
              </div>
          </td>
      </tr>
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_enter_and_escape_are_bound() {
    assert_eq!(
      row_key_action("Enter"),
      Some(RowKeyAction::Save)
    );
    assert_eq!(
      row_key_action("Escape"),
      Some(RowKeyAction::Cancel)
    );
    assert_eq!(row_key_action("a"), None);
    assert_eq!(row_key_action("Tab"), None);
  }
}
