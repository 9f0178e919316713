use taxon_model::Notice;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct NoticeToastProps {
  pub notice:     Option<Notice>,
  pub on_dismiss: Callback<yew::MouseEvent>
}

#[function_component(NoticeToast)]
pub fn notice_toast(
  props: &NoticeToastProps
) -> Html {
  let Some(notice) = &props.notice else {
    return html! {};
  };

  html! {
      <div
          class={classes!("notification", notice.severity.as_class())}
          role="status"
          onclick={props.on_dismiss.clone()}
      >
          { &notice.message }
      </div>
  }
}
