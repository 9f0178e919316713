use taxon_model::{
  CategoryKind,
  RowView
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::{
  CategoryRow,
  RowRef
};

#[derive(Properties, PartialEq)]
pub struct CategoryTableProps {
  pub kind:      CategoryKind,
  pub rows:      Vec<RowView>,
  pub filtered:  bool,
  pub on_edit:   Callback<RowRef>,
  pub on_delete: Callback<RowRef>,
  pub on_save:   Callback<RowRef>,
  pub on_cancel: Callback<RowRef>,
  pub on_draft:  Callback<String>
}

#[function_component(CategoryTable)]
pub fn category_table(
  props: &CategoryTableProps
) -> Html {
  let empty_text = if props.filtered {
    "No categories match the search."
  } else {
    "No categories yet."
  };

  html! {
      <section class="panel category-panel">
          <div class="header">{ format!("Task {}", props.kind.label()) }</div>
          <table class="category-table">
              <thead>
                  <tr>
                      <th>{ format!("Task {}", props.kind.label()) }</th>
                      <th>{ "Action" }</th>
                  </tr>
              </thead>
              <tbody id={format!("{}TableBody", props.kind.as_key())}>
                  {
                      if props.rows.is_empty() {
                          html! {
                              <tr class="empty"><td colspan="2">{ empty_text }</td></tr>
                          }
                      } else {
                          html! {
                              <>
                              { for props.rows.iter().cloned().map(|row| html! {
                                  <CategoryRow
                                      key={row.id.clone()}
                                      row={row.clone()}
                                      on_edit={props.on_edit.clone()}
                                      on_delete={props.on_delete.clone()}
                                      on_save={props.on_save.clone()}
                                      on_cancel={props.on_cancel.clone()}
                                      on_draft={props.on_draft.clone()}
                                  />
                              }) }
                              </>
                          }
                      }
                  }
              </tbody>
          </table>
      </section>
  }
}
