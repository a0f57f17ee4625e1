//! Rust backend: a static description of the window as Rust items.
//!
//! The generated module declares a small prelude of data types, one constant
//! per widget, a function per handler with a `rust` implementation, and a
//! `WIDGETS` table in preorder. A host runtime walks the table to build the
//! real widgets.

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use trellis_core::{BackendError, SourceValue};
use trellis_emit::{Emitter, EmitterContext};
use trellis_ir::{
    Alignment, BridgeDocument, BridgeWidget, Dimension, FlowDirection, Handler, LayoutDescriptor,
    PropertyValue, Unit,
};

/// Emits Rust source formatted with `prettyplease`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustEmitter;

impl RustEmitter {
    /// Backend id used by [`crate::register_builtin`].
    pub const ID: &'static str = "rust";
}

/// Formats a token stream as a Rust source file.
fn render(tokens: TokenStream) -> Result<String, BackendError> {
    let syntax_tree = syn::parse2::<syn::File>(tokens)
        .map_err(|e| BackendError::new(format!("failed to parse generated code: {e}")))?;
    Ok(prettyplease::unparse(&syntax_tree))
}

/// Writes rendered source line by line so the context's indentation applies.
fn write_rendered(ctx: &mut EmitterContext, tokens: TokenStream) -> Result<(), BackendError> {
    let source = render(tokens)?;
    let writer = ctx.writer();
    for line in source.lines() {
        writer.line(line);
    }
    Ok(())
}

fn float(value: f64) -> Result<Literal, BackendError> {
    if !value.is_finite() {
        return Err(BackendError::new(format!("cannot emit non-finite number {value}")));
    }
    Ok(Literal::f64_unsuffixed(value))
}

/// Parses `text` as an identifier. Keywords and malformed names are errors.
fn ident(text: &str) -> Result<syn::Ident, BackendError> {
    syn::parse_str::<syn::Ident>(text)
        .map_err(|_| BackendError::new(format!("`{text}` is not a valid Rust identifier")))
}

fn widget_constant(widget: &BridgeWidget) -> String {
    widget.id.as_str().replace('-', "_").to_uppercase()
}

fn widget_ident(widget: &BridgeWidget) -> Result<syn::Ident, BackendError> {
    ident(&widget_constant(widget))
}

fn handler_ident(handler: &Handler) -> Result<syn::Ident, BackendError> {
    ident(&handler.id.as_str().replace('-', "_"))
}

/// Constant name for one property of a widget, e.g. `WIDGET_1_FONT`.
fn property_ident(widget: &BridgeWidget, name: &str) -> Result<syn::Ident, BackendError> {
    let suffix: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    ident(&format!("{}_{suffix}", widget_constant(widget)))
}

fn optional_str(value: Option<&str>) -> TokenStream {
    match value {
        Some(text) => quote! { Some(#text) },
        None => quote! { None },
    }
}

fn align(alignment: Alignment) -> TokenStream {
    match alignment {
        Alignment::Start => quote! { Align::Start },
        Alignment::Center => quote! { Align::Center },
        Alignment::End => quote! { Align::End },
        Alignment::Stretch => quote! { Align::Stretch },
        Alignment::SpaceBetween => quote! { Align::SpaceBetween },
        Alignment::SpaceAround => quote! { Align::SpaceAround },
        Alignment::SpaceEvenly => quote! { Align::SpaceEvenly },
    }
}

fn dimension(dimension: &Dimension) -> Result<TokenStream, BackendError> {
    let magnitude = float(dimension.magnitude)?;
    Ok(match dimension.unit {
        Unit::Px => quote! { Value::Px(#magnitude) },
        Unit::Percent => quote! { Value::Percent(#magnitude) },
        Unit::Em => quote! { Value::Em(#magnitude) },
        Unit::Rem => quote! { Value::Rem(#magnitude) },
        Unit::Auto => quote! { Value::Auto },
    })
}

fn layout(descriptor: &LayoutDescriptor) -> Result<TokenStream, BackendError> {
    Ok(match descriptor {
        LayoutDescriptor::Flow(flow) => {
            let direction = match flow.direction {
                FlowDirection::Row => quote! { Direction::Row },
                FlowDirection::Column => quote! { Direction::Column },
            };
            let main = align(flow.main_align);
            let cross = align(flow.cross_align);
            let horizontal = float(flow.gap.horizontal)?;
            let vertical = float(flow.gap.vertical)?;
            quote! {
                Layout::Flow {
                    direction: #direction,
                    main: #main,
                    cross: #cross,
                    gap: (#horizontal, #vertical),
                }
            }
        }
        LayoutDescriptor::Grid(grid) => {
            let row = Literal::u32_unsuffixed(grid.row);
            let column = Literal::u32_unsuffixed(grid.column);
            let row_span = Literal::u32_unsuffixed(grid.row_span);
            let col_span = Literal::u32_unsuffixed(grid.col_span);
            quote! {
                Layout::Grid { row: #row, column: #column, row_span: #row_span, col_span: #col_span }
            }
        }
        LayoutDescriptor::Absolute(place) => {
            let x = float(place.x)?;
            let y = float(place.y)?;
            let width = dimension(&place.width)?;
            let height = dimension(&place.height)?;
            quote! {
                Layout::Absolute { x: #x, y: #y, width: #width, height: #height }
            }
        }
    })
}

fn value(value: &PropertyValue) -> Result<TokenStream, BackendError> {
    Ok(match value {
        PropertyValue::Dimension(size) => dimension(size)?,
        PropertyValue::Color(color) => {
            let color = color.as_str();
            quote! { Value::Color(#color) }
        }
        PropertyValue::Font(font) => {
            let family = optional_str(font.family.as_deref());
            let size = float(font.size)?;
            let weight = font.weight.as_str();
            quote! { Value::Font { family: #family, size: #size, weight: #weight } }
        }
        PropertyValue::Border(border) => {
            let width = float(border.width)?;
            let color = optional_str(border.color.as_ref().map(|color| color.as_str()));
            let style = border.style.as_str();
            quote! { Value::Border { width: #width, color: #color, style: #style } }
        }
        PropertyValue::Scalar(scalar) => match scalar {
            SourceValue::Null => quote! { Value::Null },
            SourceValue::Bool(flag) => quote! { Value::Bool(#flag) },
            SourceValue::Number(n) => {
                let n = float(*n)?;
                quote! { Value::Number(#n) }
            }
            SourceValue::String(text) => quote! { Value::Text(#text) },
            // Structured values are kept as their JSON text.
            SourceValue::Array(_) | SourceValue::Map(_) => {
                let json = serde_json::to_string(scalar)
                    .map_err(|e| BackendError::new(format!("cannot encode property: {e}")))?;
                quote! { Value::Json(#json) }
            }
        },
    })
}

/// Parses a handler body written in Rust.
fn handler_body(handler: &Handler, code: &str) -> Result<syn::Block, BackendError> {
    syn::parse_str::<syn::Block>(&format!("{{\n{code}\n}}")).map_err(|e| {
        BackendError::new(format!(
            "handler `{}` has invalid Rust code: {e}",
            handler.id
        ))
    })
}

impl RustEmitter {
    fn handler_item(&self, handler: &Handler) -> Result<Option<TokenStream>, BackendError> {
        let Some(code) = handler.implementation(self.language()) else {
            return Ok(None);
        };
        let name = handler_ident(handler)?;
        let body = handler_body(handler, code)?;
        let doc = match &handler.name {
            Some(source_name) => format!(" `{source_name}`: {} on {}", handler.event, handler.widget),
            None => format!(" {} on {}", handler.event, handler.widget),
        };
        Ok(Some(quote! {
            #[doc = #doc]
            pub fn #name() #body
        }))
    }

    fn widget_item(
        &self,
        document: &BridgeDocument,
        widget: &BridgeWidget,
    ) -> Result<TokenStream, BackendError> {
        let name = widget_ident(widget)?;
        let id = widget.id.as_str();
        let kind = widget.kind.as_str();
        let parent = optional_str(widget.parent().map(|parent| parent.as_str()));
        let children = widget.children.iter().map(|child| child.as_str());
        let layout = layout(&widget.layout.descriptor)?;

        let mut properties = Vec::with_capacity(widget.properties.len());
        for (property, raw) in &widget.properties {
            let raw = value(raw)?;
            properties.push(quote! { (#property, #raw) });
        }

        let handlers = document
            .handlers_of(widget)
            .filter(|handler| handler.implementation(self.language()).is_some())
            .map(|handler| {
                let event = handler.event.as_str();
                let function = handler_ident(handler)?;
                Ok(quote! { (#event, #function as fn()) })
            })
            .collect::<Result<Vec<TokenStream>, BackendError>>()?;

        Ok(quote! {
            pub const #name: Widget = Widget {
                id: #id,
                kind: #kind,
                parent: #parent,
                children: &[#(#children),*],
                layout: #layout,
                properties: &[#(#properties),*],
                handlers: &[#(#handlers),*],
            };
        })
    }

    fn prelude() -> TokenStream {
        quote! {
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub enum Direction {
                Row,
                Column,
            }

            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub enum Align {
                Start,
                Center,
                End,
                Stretch,
                SpaceBetween,
                SpaceAround,
                SpaceEvenly,
            }

            #[derive(Debug, Clone, Copy, PartialEq)]
            pub enum Value {
                Null,
                Bool(bool),
                Number(f64),
                Text(&'static str),
                Json(&'static str),
                Color(&'static str),
                Px(f64),
                Percent(f64),
                Em(f64),
                Rem(f64),
                Auto,
                Font { family: Option<&'static str>, size: f64, weight: &'static str },
                Border { width: f64, color: Option<&'static str>, style: &'static str },
            }

            #[derive(Debug, Clone, Copy, PartialEq)]
            pub enum Layout {
                Flow { direction: Direction, main: Align, cross: Align, gap: (f64, f64) },
                Grid { row: u32, column: u32, row_span: u32, col_span: u32 },
                Absolute { x: f64, y: f64, width: Value, height: Value },
            }

            #[derive(Debug, Clone, Copy)]
            pub struct Window {
                pub title: &'static str,
                pub width: u32,
                pub height: u32,
                pub resizable: bool,
                pub background: Option<&'static str>,
            }

            #[derive(Debug, Clone, Copy)]
            pub struct Widget {
                pub id: &'static str,
                pub kind: &'static str,
                pub parent: Option<&'static str>,
                pub children: &'static [&'static str],
                pub layout: Layout,
                pub properties: &'static [(&'static str, Value)],
                pub handlers: &'static [(&'static str, fn())],
            }
        }
    }
}

impl Emitter for RustEmitter {
    fn language(&self) -> &str {
        "rust"
    }

    fn file_extension(&self) -> &str {
        "rs"
    }

    fn comment_prefix(&self) -> &str {
        "//"
    }

    fn emit_widget(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
        widget: &BridgeWidget,
    ) -> Result<(), BackendError> {
        let item = self.widget_item(document, widget)?;
        write_rendered(ctx, item)
    }

    fn emit_layout(
        &self,
        ctx: &mut EmitterContext,
        _document: &BridgeDocument,
        widget: &BridgeWidget,
    ) -> Result<(), BackendError> {
        let name = ident(&format!("{}_LAYOUT", widget_constant(widget)))?;
        let layout = layout(&widget.layout.descriptor)?;
        write_rendered(ctx, quote! { pub const #name: Layout = #layout; })
    }

    fn emit_property(
        &self,
        ctx: &mut EmitterContext,
        _document: &BridgeDocument,
        widget: &BridgeWidget,
        name: &str,
        property: &PropertyValue,
    ) -> Result<(), BackendError> {
        let constant = property_ident(widget, name)?;
        let property = value(property)?;
        write_rendered(ctx, quote! { pub const #constant: Value = #property; })
    }

    fn emit_handler(
        &self,
        ctx: &mut EmitterContext,
        _document: &BridgeDocument,
        handler: &Handler,
    ) -> Result<(), BackendError> {
        match self.handler_item(handler)? {
            Some(item) => write_rendered(ctx, item),
            None => Ok(()),
        }
    }

    fn emit_document(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
    ) -> Result<(), BackendError> {
        let window = &document.window;
        let title = window.title.as_str();
        let width = Literal::u32_unsuffixed(window.width);
        let height = Literal::u32_unsuffixed(window.height);
        let resizable = window.resizable;
        let background = optional_str(window.background.as_ref().map(|color| color.as_str()));

        let mut handlers = Vec::new();
        for handler in document.handlers() {
            if let Some(item) = self.handler_item(handler)? {
                handlers.push(item);
            }
        }

        let mut widgets = Vec::with_capacity(document.widgets().len());
        let mut names = Vec::with_capacity(document.widgets().len());
        for widget in document.widgets() {
            widgets.push(self.widget_item(document, widget)?);
            names.push(widget_ident(widget)?);
        }

        let prelude = Self::prelude();
        let tokens = quote! {
            #prelude

            pub const WINDOW: Window = Window {
                title: #title,
                width: #width,
                height: #height,
                resizable: #resizable,
                background: #background,
            };

            #(#handlers)*

            #(#widgets)*

            /// Every widget in preorder; the first entry is the root.
            pub static WIDGETS: &[Widget] = &[#(#names),*];
        };

        ctx.comment(format!("Generated by {}", document.metadata.generator));
        if let Some(source) = &document.metadata.source {
            ctx.comment(format!("Source: {source}"));
        }
        write_rendered(ctx, tokens)
    }
}
