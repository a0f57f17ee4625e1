//! Tk command generation shared by the Tcl and Limbo backends.
//!
//! Both targets drive the same widget toolkit; they differ in a few widget
//! classes, in how a handler is invoked from a binding, and in how the
//! commands are embedded in the host language.

use trellis_ir::{
    Alignment, BridgeDocument, BridgeWidget, FlowDirection, FlowOptions, Handler, HandlerId,
    LayoutDescriptor, PropertyValue, Unit, WidgetKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dialect {
    Tcl,
    Limbo,
}

impl Dialect {
    /// Key of this dialect in handler implementation maps.
    pub(crate) const fn language(self) -> &'static str {
        match self {
            Self::Tcl => "tcl",
            Self::Limbo => "limbo",
        }
    }
}

/// Name of the procedure or function generated for a handler.
pub(crate) fn handler_name(id: &HandlerId) -> String {
    id.as_str().replace('-', "_")
}

/// Tk path of a widget, nested under its ancestors.
pub(crate) fn path(document: &BridgeDocument, widget: &BridgeWidget) -> String {
    let mut segments = vec![widget.id.as_str().replace('-', "_")];
    let mut current = widget;
    while let Some(parent) = document.parent_of(&current.id) {
        if segments.len() > document.widgets().len() {
            break;
        }
        segments.push(parent.id.as_str().replace('-', "_"));
        current = parent;
    }
    segments.reverse();
    format!(".{}", segments.join("."))
}

/// Path of the menu that holds a menu widget's entries.
pub(crate) fn menu_path(path: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::Tcl => path.to_string(),
        Dialect::Limbo => format!("{path}.items"),
    }
}

pub(crate) fn class(kind: WidgetKind, dialect: Dialect) -> &'static str {
    match (kind, dialect) {
        (WidgetKind::Frame, _) => "frame",
        (WidgetKind::Button, _) => "button",
        (WidgetKind::Label | WidgetKind::Image, _) => "label",
        (WidgetKind::Entry, _) => "entry",
        (WidgetKind::Textarea, _) => "text",
        (WidgetKind::Checkbox, _) => "checkbutton",
        (WidgetKind::Radio, _) => "radiobutton",
        (WidgetKind::List, _) => "listbox",
        (WidgetKind::Canvas, _) => "canvas",
        (WidgetKind::Slider, _) => "scale",
        (WidgetKind::Select, Dialect::Tcl) => "ttk::combobox",
        (WidgetKind::Select, Dialect::Limbo) => "choicebutton",
        (WidgetKind::Progress, Dialect::Tcl) => "ttk::progressbar",
        (WidgetKind::Progress, Dialect::Limbo) => "scale",
        (WidgetKind::Panedwindow, Dialect::Tcl) => "panedwindow",
        (WidgetKind::Tabs, Dialect::Tcl) => "ttk::notebook",
        (WidgetKind::Tree, Dialect::Tcl) => "ttk::treeview",
        (WidgetKind::Panedwindow | WidgetKind::Tabs | WidgetKind::Menubar, Dialect::Limbo) => {
            "frame"
        }
        (WidgetKind::Tree, Dialect::Limbo) => "listbox",
        (WidgetKind::Menu, Dialect::Limbo) => "menubutton",
        (WidgetKind::Menubar | WidgetKind::Menu | WidgetKind::Menuitem, _) => "menu",
    }
}

/// Quotes a word for Tk. Braces are used unless the text would unbalance
/// them.
pub(crate) fn quote(text: &str) -> String {
    if text.contains(['{', '}', '\\']) {
        let mut quoted = String::with_capacity(text.len() + 2);
        quoted.push('"');
        for c in text.chars() {
            match c {
                '\\' | '"' | '$' | '[' | ']' | '{' | '}' => {
                    quoted.push('\\');
                    quoted.push(c);
                }
                '\n' => quoted.push_str("\\n"),
                _ => quoted.push(c),
            }
        }
        quoted.push('"');
        quoted
    } else {
        format!("{{{text}}}")
    }
}

fn pixels(value: f64) -> i64 {
    value.round() as i64
}

/// Words invoking a handler from a `-command` option or a binding.
pub(crate) fn invoke(handler: &Handler, dialect: Dialect) -> String {
    match dialect {
        Dialect::Tcl => handler_name(&handler.id),
        Dialect::Limbo => format!("{{send cmd {}}}", handler_name(&handler.id)),
    }
}

fn is_menu_kind(kind: WidgetKind) -> bool {
    matches!(
        kind,
        WidgetKind::Menubar | WidgetKind::Menu | WidgetKind::Menuitem
    )
}

/// Handlers of a widget that have code for this dialect.
fn bound_handlers<'a>(
    document: &'a BridgeDocument,
    widget: &'a BridgeWidget,
    dialect: Dialect,
) -> impl Iterator<Item = &'a Handler> + 'a {
    document
        .handlers_of(widget)
        .filter(move |handler| handler.implementation(dialect.language()).is_some())
}

/// Commands creating a widget, without its properties.
pub(crate) fn create(
    document: &BridgeDocument,
    widget: &BridgeWidget,
    dialect: Dialect,
) -> Vec<String> {
    let path = path(document, widget);
    let label = quote(widget.text().unwrap_or(widget.source_type.as_str()));
    let parent = document.parent_of(&widget.id);
    let parent_menu = parent
        .filter(|parent| is_menu_kind(parent.kind))
        .map(|parent| menu_path(&self::path(document, parent), dialect));

    match widget.kind {
        WidgetKind::Menuitem => {
            let Some(parent_menu) = parent_menu else {
                return vec![format!("button {path} -text {label}")];
            };
            let mut command = format!("{parent_menu} add command -label {label}");
            if let Some(handler) = bound_handlers(document, widget, dialect)
                .find(|handler| handler.event == "click")
            {
                command.push_str(&format!(" -command {}", invoke(handler, dialect)));
            }
            vec![command]
        }
        WidgetKind::Menu if dialect == Dialect::Limbo => {
            let items = menu_path(&path, dialect);
            vec![
                format!("menubutton {path} -text {label} -menu {items}"),
                format!("menu {items}"),
            ]
        }
        WidgetKind::Menu => {
            let mut commands = vec![format!("menu {path} -tearoff 0")];
            if let Some(parent_menu) = parent_menu {
                commands.push(format!(
                    "{parent_menu} add cascade -label {label} -menu {path}"
                ));
            }
            commands
        }
        WidgetKind::Menubar if dialect == Dialect::Tcl => {
            vec![
                format!("menu {path} -tearoff 0"),
                format!(". configure -menu {path}"),
            ]
        }
        kind => vec![format!("{} {path}", class(kind, dialect))],
    }
}

/// Command applying one property, or `None` if Tk has no equivalent.
pub(crate) fn property_command(
    path: &str,
    kind: WidgetKind,
    name: &str,
    value: &PropertyValue,
    dialect: Dialect,
) -> Option<String> {
    if matches!(kind, WidgetKind::Menuitem | WidgetKind::Menubar) {
        return None;
    }

    let options = match (name, value) {
        ("text", _) => {
            let text = quote(value.as_str()?);
            return match kind {
                WidgetKind::Entry => Some(format!("{path} insert 0 {text}")),
                WidgetKind::Textarea => Some(format!("{path} insert 1.0 {text}")),
                WidgetKind::Frame | WidgetKind::Menu | WidgetKind::Canvas => None,
                _ => Some(format!("{path} configure -text {text}")),
            };
        }
        ("background" | "foreground", PropertyValue::Color(color)) => {
            format!("-{name} {}", color.rgb())
        }
        ("font", PropertyValue::Font(font)) if dialect == Dialect::Tcl => {
            let family = quote(font.family.as_deref().unwrap_or("TkDefaultFont"));
            let weight = if font.weight == "bold" || font.weight.parse::<u32>().is_ok_and(|w| w >= 600) {
                "bold"
            } else {
                "normal"
            };
            format!("-font {{{family} {} {weight}}}", pixels(font.size))
        }
        ("width" | "height", PropertyValue::Dimension(dimension)) if dimension.unit == Unit::Px => {
            format!("-{name} {}", pixels(dimension.magnitude))
        }
        ("border", PropertyValue::Border(border)) => {
            let relief = match border.style.as_str() {
                "groove" | "ridge" => border.style.as_str(),
                "none" | "hidden" => "flat",
                "inset" => "sunken",
                "outset" => "raised",
                _ => "solid",
            };
            format!("-borderwidth {} -relief {relief}", pixels(border.width))
        }
        ("enabled", PropertyValue::Scalar(_)) => {
            let state = if value.as_bool()? { "normal" } else { "disabled" };
            format!("-state {state}")
        }
        ("disabled", PropertyValue::Scalar(_)) => {
            let state = if value.as_bool()? { "disabled" } else { "normal" };
            format!("-state {state}")
        }
        ("min" | "max", PropertyValue::Scalar(_)) if kind == WidgetKind::Slider => {
            let option = if name == "min" { "from" } else { "to" };
            format!("-{option} {}", value.as_f64()?)
        }
        _ => return None,
    };

    Some(format!("{path} configure {options}"))
}

/// Bindings connecting a widget's handlers.
pub(crate) fn bind_commands(
    document: &BridgeDocument,
    widget: &BridgeWidget,
    dialect: Dialect,
) -> Vec<String> {
    if widget.kind == WidgetKind::Menuitem {
        return Vec::new();
    }
    let path = path(document, widget);
    bound_handlers(document, widget, dialect)
        .map(|handler| {
            let command = invoke(handler, dialect);
            let takes_command = matches!(
                widget.kind,
                WidgetKind::Button | WidgetKind::Checkbox | WidgetKind::Radio
            );
            if handler.event == "click" && takes_command {
                format!("{path} configure -command {command}")
            } else {
                format!("bind {path} {} {command}", event_sequence(&handler.event))
            }
        })
        .collect()
}

fn event_sequence(event: &str) -> String {
    let sequence = match event.to_ascii_lowercase().as_str() {
        "click" | "press" => "<ButtonRelease-1>",
        "doubleclick" | "dblclick" => "<Double-Button-1>",
        "change" | "input" | "keyup" => "<KeyRelease>",
        "keypress" | "keydown" => "<KeyPress>",
        "enter" | "hover" | "mouseenter" => "<Enter>",
        "leave" | "mouseleave" => "<Leave>",
        "focus" => "<FocusIn>",
        "blur" => "<FocusOut>",
        "submit" => "<Key-Return>",
        _ => return format!("<<{event}>>"),
    };
    sequence.to_string()
}

/// Geometry-manager command placing a widget, or `None` for menu entries.
pub(crate) fn layout_command(
    document: &BridgeDocument,
    widget: &BridgeWidget,
    dialect: Dialect,
) -> Option<String> {
    if is_menu_kind(widget.kind) && !(dialect == Dialect::Limbo && widget.kind != WidgetKind::Menuitem) {
        return None;
    }
    let path = path(document, widget);

    let Some(parent) = document.parent_of(&widget.id) else {
        return Some(format!("pack {path} -fill both -expand 1"));
    };
    if dialect == Dialect::Tcl {
        match parent.kind {
            WidgetKind::Tabs => {
                let label = quote(widget.text().unwrap_or(widget.source_type.as_str()));
                return Some(format!("{} add {path} -text {label}", self::path(document, parent)));
            }
            WidgetKind::Panedwindow => {
                return Some(format!("{} add {path}", self::path(document, parent)));
            }
            _ => {}
        }
    }

    let command = match &widget.layout.descriptor {
        LayoutDescriptor::Flow(flow) => {
            let leading = parent.children.first() != Some(&widget.id);
            pack(&path, flow, leading, dialect)
        }
        LayoutDescriptor::Grid(grid) => {
            let mut command = format!("grid {path} -row {} -column {}", grid.row, grid.column);
            if grid.row_span > 1 {
                command.push_str(&format!(" -rowspan {}", grid.row_span));
            }
            if grid.col_span > 1 {
                command.push_str(&format!(" -columnspan {}", grid.col_span));
            }
            command
        }
        LayoutDescriptor::Absolute(place) if dialect == Dialect::Tcl => {
            let mut command = format!(
                "place {path} -x {} -y {}",
                pixels(place.x),
                pixels(place.y)
            );
            for (axis, size) in [("width", place.width), ("height", place.height)] {
                match size.unit {
                    Unit::Px => command.push_str(&format!(" -{axis} {}", pixels(size.magnitude))),
                    Unit::Percent => {
                        command.push_str(&format!(" -rel{axis} {}", size.magnitude / 100.0));
                    }
                    _ => {}
                }
            }
            command
        }
        // Limbo's Tk has no placer; offsets from the top-left corner are the
        // closest packer equivalent.
        LayoutDescriptor::Absolute(place) => format!(
            "pack {path} -anchor nw -padx {} -pady {}",
            pixels(place.x),
            pixels(place.y)
        ),
    };
    Some(command)
}

fn pack(path: &str, flow: &FlowOptions, leading_gap: bool, dialect: Dialect) -> String {
    let row = flow.direction == FlowDirection::Row;
    let side = match (row, flow.main_align) {
        (true, Alignment::End) => "right",
        (true, _) => "left",
        (false, Alignment::End) => "bottom",
        (false, _) => "top",
    };
    let mut command = format!("pack {path} -side {side}");

    let expand = flow.main_align == Alignment::Center || flow.main_align.is_distributed();
    match flow.cross_align {
        Alignment::Stretch => command.push_str(if row { " -fill y" } else { " -fill x" }),
        Alignment::Center => command.push_str(" -anchor center"),
        Alignment::End => command.push_str(if row { " -anchor s" } else { " -anchor e" }),
        _ => command.push_str(if row { " -anchor n" } else { " -anchor w" }),
    }
    if expand {
        command.push_str(" -expand 1");
    }

    let (option, gap) = if row {
        ("padx", flow.gap.horizontal)
    } else {
        ("pady", flow.gap.vertical)
    };
    if leading_gap && gap > 0.0 {
        match dialect {
            Dialect::Tcl => command.push_str(&format!(" -{option} {{{} 0}}", pixels(gap))),
            Dialect::Limbo => command.push_str(&format!(" -{option} {}", pixels(gap))),
        }
    }
    command
}
