mod add_category_modal;
mod category_row;
mod category_table;
mod notice_toast;
mod sidebar;

use taxon_model::CategoryKind;

pub use add_category_modal::AddCategoryModal;
pub use category_row::CategoryRow;
pub use category_table::CategoryTable;
pub use notice_toast::NoticeToast;
pub use sidebar::Sidebar;

/// Row address carried by every table action.
pub type RowRef = (CategoryKind, String);
