use crate::syntax::MarkupSyntax;

/// Splits a reply into ordered pages at the page-break marker.
///
/// Empty pages are preserved here so that re-joining with the marker
/// reproduces the input exactly; the media segmenter drops them later.
#[derive(Clone, Debug)]
pub struct PageBreakSplitter {
    syntax: MarkupSyntax,
}

impl PageBreakSplitter {
    pub fn new(syntax: MarkupSyntax) -> Self {
        Self { syntax }
    }

    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        text.split(self.syntax.page_break.as_str()).collect()
    }
}
