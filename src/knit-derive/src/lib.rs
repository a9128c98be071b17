mod attrs;
mod impls;

use proc_macro::TokenStream;

/// Implements `knit::provider::component::Component` from the constructor of
/// an `impl` block marked with `#[inject]`.
///
/// Each constructor argument is resolved by its identifier and falls back to
/// its declared type. On arguments, `#[named("x")]` replaces the identifier,
/// `#[default]` uses `Default::default()` when the name is not bound and
/// `#[default(expr)]` uses `expr` instead.
///
/// `#[component(Output, post_processor)]` turns the constructed `Self` into
/// `Output`, e.g. `#[component(Rc<dyn Trait>, Rc::new)]`.
#[proc_macro_attribute]
pub fn component(attr: TokenStream, item: TokenStream) -> TokenStream {
    attrs::parse_attributes(attr)
        .and_then(|attr_data| impls::expand_implementation(item, attr_data))
        .unwrap_or_else(|err| err.into_compile_error())
        .into()
}
