use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
  pub open: bool
}

#[function_component(Sidebar)]
pub fn sidebar(
  props: &SidebarProps
) -> Html {
  let class = if props.open {
    "sidebar show"
  } else {
    "sidebar"
  };

  html! {
      <aside class={class} onclick={|e: yew::MouseEvent| e.stop_propagation()}>
          <div class="brand">{ "Dashboard" }</div>
          <nav>
              <div class="item">{ "My Tasks" }</div>
              <div class="item active">{ "Task Categories" }</div>
              <div class="item">{ "Settings" }</div>
          </nav>
      </aside>
  }
}
