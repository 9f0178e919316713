mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Local;
use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use taxon_model::{
  Category,
  CategoryError,
  CategoryKind,
  CategoryManager,
  Notice
};
use wasm_bindgen::JsCast;
use web_sys::{
  HtmlInputElement,
  KeyboardEvent
};
use yew::{
  Callback,
  Html,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref,
  use_state
};

use self::storage::{
  LocalStore,
  load_category_config
};
use crate::components::{
  AddCategoryModal,
  CategoryTable,
  NoticeToast,
  RowRef,
  Sidebar
};

const NOTICE_TIMEOUT_MS: u32 = 3_000;
const NARROW_VIEWPORT_PX: f64 = 768.0;

type SharedManager =
  Rc<RefCell<CategoryManager<LocalStore>>>;

#[derive(Clone, Debug, PartialEq)]
struct AddDraft {
  name: String,
  kind: CategoryKind
}

impl Default for AddDraft {
  fn default() -> Self {
    Self {
      name: String::new(),
      kind: CategoryKind::Status
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let manager: SharedManager =
    use_mut_ref(|| {
      CategoryManager::load(
        LocalStore,
        load_category_config()
      )
    });
  let redraw = use_force_update();
  let search = use_state(String::new);
  let sidebar_open =
    use_state(|| false);
  let add_draft =
    use_state(|| None::<AddDraft>);
  let notice =
    use_state(|| None::<Notice>);
  let notice_seq =
    use_mut_ref(|| 0_u64);

  {
    use_effect_with((), move |_| {
      tracing::info!(
        "category dashboard mounted"
      );
      || ()
    });
  }

  let notify = {
    let notice = notice.clone();
    let notice_seq = notice_seq.clone();
    Callback::from(move |next: Notice| {
      let id = {
        let mut seq =
          notice_seq.borrow_mut();
        *seq += 1;
        *seq
      };
      notice.set(Some(next));

      let notice = notice.clone();
      let notice_seq = notice_seq.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          TimeoutFuture::new(
            NOTICE_TIMEOUT_MS
          )
          .await;
          if *notice_seq.borrow() == id {
            notice.set(None);
          }
        }
      );
    })
  };

  {
    let manager = manager.clone();
    let add_draft = add_draft.clone();
    let redraw = redraw.clone();
    use_effect_with((), move |_| {
      let listener =
        web_sys::window()
          .and_then(|window| {
            window.document()
          })
          .map(|document| {
            EventListener::new(
              &document,
              "keydown",
              move |event| {
                let is_escape = event
                  .dyn_ref::<KeyboardEvent>()
                  .is_some_and(|event| {
                    event.key() == "Escape"
                  });
                if !is_escape {
                  return;
                }
                add_draft.set(None);
                if manager
                  .borrow_mut()
                  .cancel_all()
                  .is_some()
                {
                  redraw.force_update();
                }
              }
            )
          });
      move || drop(listener)
    });
  }

  let on_edit = {
    let manager = manager.clone();
    let notify = notify.clone();
    let redraw = redraw.clone();
    Callback::from(
      move |(kind, id): RowRef| {
        let result = manager
          .borrow_mut()
          .begin_edit(kind, &id);
        if let Err(error) = result {
          report(&notify, &error);
        }
        redraw.force_update();
      }
    )
  };

  let on_draft = {
    let manager = manager.clone();
    let redraw = redraw.clone();
    Callback::from(move |draft: String| {
      let result = manager
        .borrow_mut()
        .update_draft(&draft);
      if let Err(error) = result {
        tracing::debug!(%error, "draft without an active edit");
      }
      redraw.force_update();
    })
  };

  let on_save = {
    let manager = manager.clone();
    let notify = notify.clone();
    let redraw = redraw.clone();
    Callback::from(
      move |(kind, id): RowRef| {
        let result = manager
          .borrow_mut()
          .save_edit(kind, &id);
        match result {
          | Ok(next) => notify.emit(next),
          | Err(error) => {
            report(&notify, &error)
          }
        }
        redraw.force_update();
      }
    )
  };

  let on_cancel = {
    let manager = manager.clone();
    let notify = notify.clone();
    let redraw = redraw.clone();
    Callback::from(
      move |(kind, id): RowRef| {
        let result = manager
          .borrow_mut()
          .cancel_edit(kind, &id);
        if let Err(error) = result {
          report(&notify, &error);
        }
        redraw.force_update();
      }
    )
  };

  let on_delete = {
    let manager = manager.clone();
    let notify = notify.clone();
    let redraw = redraw.clone();
    Callback::from(
      move |(kind, id): RowRef| {
        let result = manager
          .borrow_mut()
          .delete(kind, &id, confirm_delete);
        match result {
          | Ok(Some(next)) => {
            notify.emit(next)
          }
          | Ok(None) => {
            tracing::info!(
              %kind,
              %id,
              "category deletion canceled"
            );
          }
          | Err(error) => {
            report(&notify, &error)
          }
        }
        redraw.force_update();
      }
    )
  };

  let on_open_add = {
    let manager = manager.clone();
    let add_draft = add_draft.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        manager.borrow_mut().open_add();
        add_draft
          .set(Some(AddDraft::default()));
      }
    )
  };

  let on_close_add = {
    let add_draft = add_draft.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        add_draft.set(None)
      }
    )
  };

  let on_add_name = {
    let add_draft = add_draft.clone();
    Callback::from(move |name: String| {
      let kind = (*add_draft)
        .as_ref()
        .map(|draft| draft.kind)
        .unwrap_or(CategoryKind::Status);
      add_draft.set(Some(AddDraft {
        name,
        kind
      }));
    })
  };

  let on_add_kind = {
    let add_draft = add_draft.clone();
    Callback::from(
      move |kind: CategoryKind| {
        let name = (*add_draft)
          .as_ref()
          .map(|draft| draft.name.clone())
          .unwrap_or_default();
        add_draft.set(Some(AddDraft {
          name,
          kind
        }));
      }
    )
  };

  let on_add_submit = {
    let manager = manager.clone();
    let add_draft = add_draft.clone();
    let notify = notify.clone();
    let redraw = redraw.clone();
    Callback::from(move |_: ()| {
      let Some(draft) =
        (*add_draft).clone()
      else {
        return;
      };
      let result = manager
        .borrow_mut()
        .add(draft.kind, &draft.name);
      match result {
        | Ok(next) => {
          add_draft.set(None);
          notify.emit(next);
        }
        | Err(error) => {
          report(&notify, &error)
        }
      }
      redraw.force_update();
    })
  };

  let on_search = {
    let search = search.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        search.set(input.value());
      }
    )
  };

  let on_toggle_sidebar = {
    let sidebar_open =
      sidebar_open.clone();
    Callback::from(
      move |e: yew::MouseEvent| {
        e.stop_propagation();
        sidebar_open.set(!*sidebar_open);
      }
    )
  };

  let on_main_click = {
    let sidebar_open =
      sidebar_open.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        if *sidebar_open
          && is_narrow_viewport()
        {
          sidebar_open.set(false);
        }
      }
    )
  };

  let on_dismiss_notice = {
    let notice = notice.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        notice.set(None)
      }
    )
  };

  let filtered =
    !search.trim().is_empty();
  let tables = {
    let manager = manager.borrow();
    CategoryKind::all()
      .into_iter()
      .map(|kind| {
        (kind, manager.rows(kind, search.as_str()))
      })
      .collect::<Vec<_>>()
  };
  let modal = (*add_draft).clone();

  html! {
      <div class="app-shell">
          <Sidebar open={*sidebar_open} />
          <main class="content" onclick={on_main_click}>
              <header class="topbar">
                  <button
                      type="button"
                      class="hamburger"
                      aria-label="Toggle sidebar"
                      onclick={on_toggle_sidebar}
                  >
                      { "☰" }
                  </button>
                  <div class="date" id="currentDate">{ dashboard_date() }</div>
                  <input
                      class="search"
                      type="search"
                      placeholder="Search categories"
                      value={(*search).clone()}
                      oninput={on_search}
                  />
                  <button type="button" class="btn primary" onclick={on_open_add}>
                      { "Add Category" }
                  </button>
              </header>
              <div class="tables">
                  {
                      for tables.into_iter().map(|(kind, rows)| html! {
                          <CategoryTable
                              key={kind.as_key()}
                              kind={kind}
                              rows={rows}
                              filtered={filtered}
                              on_edit={on_edit.clone()}
                              on_delete={on_delete.clone()}
                              on_save={on_save.clone()}
                              on_cancel={on_cancel.clone()}
                              on_draft={on_draft.clone()}
                          />
                      })
                  }
              </div>
          </main>
          <AddCategoryModal
              open={modal.is_some()}
              name={modal.as_ref().map(|draft| draft.name.clone()).unwrap_or_default()}
              kind={modal.as_ref().map(|draft| draft.kind).unwrap_or(CategoryKind::Status)}
              on_name={on_add_name}
              on_kind={on_add_kind}
              on_close={on_close_add}
              on_submit={on_add_submit}
          />
          <NoticeToast notice={(*notice).clone()} on_dismiss={on_dismiss_notice} />
      </div>
  }
}

fn report(
  notify: &Callback<Notice>,
  error: &CategoryError
) {
  match error.notice() {
    | Some(notice) => notify.emit(notice),
    | None => {
      tracing::warn!(%error, "category action failed silently")
    }
  }
}

fn confirm_delete(
  category: &Category
) -> bool {
  web_sys::window()
    .and_then(|window| {
      window
        .confirm_with_message(
          &delete_prompt(category)
        )
        .ok()
    })
    .unwrap_or(false)
}

fn delete_prompt(
  category: &Category
) -> String {
  format!(
    "Are you sure you want to delete \
     the category \"{}\"?",
    category.name
  )
}

fn is_narrow_viewport() -> bool {
  web_sys::window()
    .and_then(|window| {
      window.inner_width().ok()
    })
    .and_then(|width| width.as_f64())
    .is_some_and(|width| {
      width <= NARROW_VIEWPORT_PX
    })
}

fn dashboard_date() -> String {
  Local::now()
    .format("%A, %B %-d, %Y")
    .to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn delete_prompt_quotes_the_name() {
    let category = Category {
      id:   "c1".to_string(),
      name: "In Progress".to_string()
    };
    assert_eq!(
      delete_prompt(&category),
      "Are you sure you want to delete \
       the category \"In Progress\"?"
    );
  }

  #[test]
  fn add_draft_defaults_to_status() {
    let draft = AddDraft::default();
    assert_eq!(
      draft.kind,
      CategoryKind::Status
    );
    assert!(draft.name.is_empty());
  }
}
