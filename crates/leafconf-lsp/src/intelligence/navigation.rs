//! Definition and reference lookup for proxy and group names

use tower_lsp::lsp_types::{self as lsp, Location, Url};

use leafconf_core::{name_at, resolve_declaration, resolve_references, ConfDocument};

use crate::encoding::{PositionEncoding, PositionMapper};

/// Analyzer for definition and reference requests
pub struct NavigationAnalyzer {
    doc: ConfDocument,
    encoding: PositionEncoding,
}

impl NavigationAnalyzer {
    pub fn new(text: &str) -> Self {
        Self::with_encoding(text, PositionEncoding::default())
    }

    /// Analyzer for a client counting columns in `encoding`
    pub fn with_encoding(text: &str, encoding: PositionEncoding) -> Self {
        Self {
            doc: ConfDocument::parse(text),
            encoding,
        }
    }

    fn mapper(&self) -> PositionMapper<'_> {
        PositionMapper::new(&self.doc, self.encoding)
    }

    /// Declaration of the name under the cursor
    ///
    /// Works on declarations too, in which case the first declaration of
    /// that name is returned.
    pub fn definition(&self, uri: &Url, position: lsp::Position) -> Option<Location> {
        let mapper = self.mapper();
        let site = name_at(&self.doc, mapper.position(position))?;
        let decl = resolve_declaration(&self.doc, &site.name)?;
        Some(Location::new(uri.clone(), mapper.lsp_range(decl.name_range())))
    }

    /// Every occurrence of the name under the cursor, in document order
    pub fn references(
        &self,
        uri: &Url,
        position: lsp::Position,
        include_declaration: bool,
    ) -> Vec<Location> {
        let mapper = self.mapper();
        let Some(site) = name_at(&self.doc, mapper.position(position)) else {
            return Vec::new();
        };
        resolve_references(&self.doc, &site.name, include_declaration)
            .into_iter()
            .map(|r| Location::new(uri.clone(), mapper.lsp_range(r.range)))
            .collect()
    }
}
