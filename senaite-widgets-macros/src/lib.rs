//! Procedural macros for `senaite-widgets`.
//!
//! - `#[derive(WidgetTable)]` - Turn an enum of widget kinds into a
//!   compile-time checked selector / factory table

use proc_macro::TokenStream;

mod table;

/// Derive `WidgetTable` for a fieldless enum.
///
/// Every variant needs a `#[widget(...)]` attribute:
///
/// - `selector = "..."` - CSS selector list matching the widget's element
/// - `factory = Path` - factory type, built with `Default::default()`
/// - `name = "..."` - optional diagnostic name; defaults to the variant name
///   in snake case
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Debug, WidgetTable)]
/// enum Kind {
///     #[widget(selector = ".senaite-phone-widget-input", factory = PhoneFactory)]
///     Phone,
/// }
/// ```
#[proc_macro_derive(WidgetTable, attributes(widget))]
pub fn derive_widget_table(input: TokenStream) -> TokenStream {
    table::derive_widget_table_impl(input)
}
