use taxon_model::CategoryKind;
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_node_ref
};

#[derive(Properties, PartialEq)]
pub struct AddCategoryModalProps {
  pub open:      bool,
  pub name:      String,
  pub kind:      CategoryKind,
  pub on_name:   Callback<String>,
  pub on_kind:   Callback<CategoryKind>,
  pub on_close:  Callback<yew::MouseEvent>,
  pub on_submit: Callback<()>
}

#[function_component(AddCategoryModal)]
pub fn add_category_modal(
  props: &AddCategoryModalProps
) -> Html {
  let input_ref = use_node_ref();

  {
    let input_ref = input_ref.clone();
    use_effect_with(props.open, move |open| {
      if *open
        && let Some(input) = input_ref
          .cast::<HtmlInputElement>()
      {
        let _ = input.focus();
      }
      || ()
    });
  }

  if !props.open {
    return html! {};
  }

  let on_name = props.on_name.clone();
  let oninput =
    Callback::from(move |e: web_sys::InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_name.emit(input.value());
    });

  let on_kind = props.on_kind.clone();
  let onchange =
    Callback::from(move |e: web_sys::Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      if let Some(kind) =
        CategoryKind::from_key(&select.value())
      {
        on_kind.emit(kind);
      }
    });

  let onkeydown = {
    let on_submit = props.on_submit.clone();
    Callback::from(move |e: web_sys::KeyboardEvent| {
      if e.key() == "Enter" {
        e.prevent_default();
        on_submit.emit(());
      }
    })
  };

  let on_save = {
    let on_submit = props.on_submit.clone();
    Callback::from(move |_: yew::MouseEvent| {
      on_submit.emit(())
    })
  };

  html! {
      <div class="modal-backdrop" onclick={props.on_close.clone()}>
          <div class="modal modal-sm" onclick={Callback::from(|e: yew::MouseEvent| e.stop_propagation())}>
              <div class="header">
                  { "Add Category" }
                  <button type="button" class="close" onclick={props.on_close.clone()}>{ "×" }</button>
              </div>
              <div class="content">
                  <div class="field">
                      <label for="categoryType">{ "List" }</label>
                      <select id="categoryType" onchange={onchange}>
                          {
                              for CategoryKind::all().into_iter().map(|kind| html! {
                                  <option value={kind.as_key()} selected={kind == props.kind}>
                                      { kind.label() }
                                  </option>
                              })
                          }
                      </select>
                  </div>
                  <div class="field">
                      <label for="categoryName">{ "Category Name" }</label>
                      <input
                          id="categoryName"
                          ref={input_ref}
                          type="text"
                          value={props.name.clone()}
                          oninput={oninput}
                          onkeydown={onkeydown}
                      />
                  </div>
                  <div class="footer">
                      <button type="button" class="btn" onclick={props.on_close.clone()}>{ "Cancel" }</button>
                      <button
                          type="button"
                          class="btn primary"
                          onclick={on_save}
                      >
                          { "Save" }
                      </button>
                  </div>
              </div>
          </div>
      </div>
  }
}
