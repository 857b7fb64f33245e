pub mod anatomy_viewer;
pub mod patient_list;
pub mod report_panel;
pub mod uploader;

pub use anatomy_viewer::anatomy_viewer_panel;
pub use patient_list::patient_list_panel;
pub use report_panel::report_panel;
pub use uploader::uploader_panel;
