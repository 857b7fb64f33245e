#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Uploader,
}

impl Page {
    /// Toggle order, left to right.
    pub const ALL: [Page; 2] = [Page::Dashboard, Page::Uploader];

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Uploader => "Upload PDFs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_is_the_landing_page() {
        assert_eq!(Page::default(), Page::Dashboard);
        assert_eq!(Page::ALL[0], Page::default());
        assert_eq!(Page::Uploader.title(), "Upload PDFs");
    }
}
