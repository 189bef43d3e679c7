pub mod surfaces;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::output::{self, DisplayOutput, OutputFormat};
use crate::palette::TypeColors;
use crate::view::{self, ViewQuery};

pub use surfaces::{
    CollectingSink, ConsoleSink, FileSurface, MemorySurface, StdoutSurface, ValueField,
};

/// A value-holding control: the search bar or one of the selectors.
pub trait InputSource {
    fn current_value(&self) -> String;
}

/// Accepts one opaque block of content and replaces whatever it showed before.
pub trait DisplaySurface {
    fn replace(&mut self, content: &[u8]) -> Result<(), ControllerError>;
}

pub trait DiagnosticSink {
    fn warn(&self, message: &str);
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("failed to write output to {target}: {source}")]
    SurfaceWrite {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Search,
    TypeFilter,
    Sort,
}

impl Control {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::TypeFilter => "type",
            Self::Sort => "sort",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Recomputing,
}

#[derive(Clone, Debug)]
pub struct Inputs<I> {
    pub search: I,
    pub type_filter: I,
    pub sort: I,
}

impl<I: InputSource> Inputs<I> {
    pub fn query(&self) -> ViewQuery {
        ViewQuery {
            search: self.search.current_value(),
            type_filter: self.type_filter.current_value(),
            sort: self.sort.current_value(),
        }
    }

    pub fn get(&self, control: Control) -> &I {
        match control {
            Control::Search => &self.search,
            Control::TypeFilter => &self.type_filter,
            Control::Sort => &self.sort,
        }
    }
}

pub struct Controller<I, S, D> {
    catalog: Catalog,
    colors: TypeColors,
    inputs: Inputs<I>,
    surface: S,
    sink: D,
    format: OutputFormat,
    state: ControllerState,
    passes: usize,
}

impl<I, S, D> Controller<I, S, D>
where
    I: InputSource,
    S: DisplaySurface,
    D: DiagnosticSink,
{
    pub fn new(
        catalog: Catalog,
        colors: TypeColors,
        inputs: Inputs<I>,
        surface: S,
        sink: D,
        format: OutputFormat,
    ) -> Self {
        Self {
            catalog,
            colors,
            inputs,
            surface,
            sink,
            format,
            state: ControllerState::Idle,
            passes: 0,
        }
    }

    /// Initial pass with whatever the controls hold at startup.
    pub fn start(&mut self) -> Result<DisplayOutput, ControllerError> {
        self.recompute()
    }

    /// Every pass reads all three controls, so which one changed does not
    /// affect the result.
    pub fn on_change(&mut self, _changed: Control) -> Result<DisplayOutput, ControllerError> {
        self.recompute()
    }

    fn recompute(&mut self) -> Result<DisplayOutput, ControllerError> {
        self.state = ControllerState::Recomputing;
        let result = self.run_pass();
        self.state = ControllerState::Idle;
        self.passes += 1;
        result
    }

    fn run_pass(&mut self) -> Result<DisplayOutput, ControllerError> {
        let query = self.inputs.query();
        if let Some(raw) = query.unrecognized_sort() {
            self.sink
                .warn(&format!("unknown sort order '{raw}', keeping catalog order"));
        }
        let view = view::compute_view(&self.catalog, &query);
        let rendered = output::render(&view, &self.colors, &self.sink);
        let encoded = output::encode(&rendered, self.format);
        self.surface.replace(&encoded)?;
        Ok(rendered)
    }

    pub fn query(&self) -> ViewQuery {
        self.inputs.query()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }
}
