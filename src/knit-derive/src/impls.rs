use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::token::Comma;
use syn::visit_mut::{self, VisitMut};
use syn::{
    AngleBracketedGenericArguments, Attribute, Error as SynError, FnArg, GenericArgument, Ident,
    ImplItem, ImplItemFn, ItemImpl, LitStr, Meta, Pat, PatIdent, PatType, PathArguments,
    Result as SynResult, ReturnType, Signature, Type, TypePath,
};

use crate::attrs::AttributeData;

#[derive(Debug)]
struct ConstructorData {
    self_type: TypePath,
    identifier: Ident,
    arguments: Vec<ArgumentData>,
    return_type: ReturnTypeData,
}

#[derive(Debug)]
struct ArgumentData {
    span: Span,
    name: LitStr,
    ty: Type,
    fallback: FallbackData,
}

#[derive(Debug)]
enum FallbackData {
    None,
    Default,
    Expr(TokenStream2),
}

#[derive(Debug)]
enum ReturnTypeData {
    Infallible,
    Result { error_type: TypePath },
}

struct AttributeRemovalVisitor;

impl AttributeRemovalVisitor {
    /// `#[inject]`, `#[named(..)]`, `#[default]` and `#[default(..)]`.
    fn is_helper_attribute(attr: &Attribute) -> bool {
        match &attr.meta {
            Meta::Path(path) => path.is_ident("inject") || path.is_ident("default"),
            Meta::List(list) => list.path.is_ident("named") || list.path.is_ident("default"),
            Meta::NameValue(_) => false,
        }
    }
}

impl VisitMut for AttributeRemovalVisitor {
    fn visit_attributes_mut(&mut self, attrs: &mut Vec<Attribute>) {
        attrs.retain(|attr| !Self::is_helper_attribute(attr));
        attrs
            .iter_mut()
            .for_each(|attr| visit_mut::visit_attribute_mut(self, attr));
    }
}

pub fn expand_implementation(
    item: TokenStream,
    attr_data: AttributeData,
) -> SynResult<TokenStream2> {
    let mut item_impl = syn::parse::<ItemImpl>(item).map_err(|err| {
        SynError::new(
            err.span(),
            "`#[component]` expects an inherent `impl` block",
        )
    })?;

    let Type::Path(self_type) = item_impl.self_ty.as_ref() else {
        return Err(SynError::new(
            item_impl.self_ty.span(),
            "`#[component]` expects a named self type",
        ));
    };
    let signature = find_constructor(&item_impl)?;
    let ctor_data = parse_constructor(self_type.clone(), signature.clone())?;
    let component_impl = expand_component_implementation(ctor_data, attr_data)?;

    AttributeRemovalVisitor.visit_item_impl_mut(&mut item_impl);

    Ok(quote! {
        #item_impl
        #component_impl
    })
}

fn find_constructor(item_impl: &ItemImpl) -> SynResult<&Signature> {
    let mut candidates = item_impl.items.iter().filter_map(|item| match item {
        ImplItem::Fn(item_fn) if has_inject_attribute(item_fn) => Some(&item_fn.sig),
        _ => None,
    });

    let Some(signature) = candidates.next() else {
        return Err(SynError::new(
            item_impl.span(),
            "expects one associated function annotated with `#[inject]`",
        ));
    };
    if let Some(extra) = candidates.next() {
        return Err(SynError::new(
            extra.span(),
            "only one associated function can be annotated with `#[inject]`",
        ));
    }
    if let Some(receiver) = signature.receiver() {
        return Err(SynError::new(
            receiver.span(),
            "`#[inject]` expects an associated function without `self`",
        ));
    }

    Ok(signature)
}

fn has_inject_attribute(item_fn: &ImplItemFn) -> bool {
    item_fn
        .attrs
        .iter()
        .any(|attr| matches!(&attr.meta, Meta::Path(path) if path.is_ident("inject")))
}

fn parse_constructor(self_type: TypePath, signature: Signature) -> SynResult<ConstructorData> {
    Ok(ConstructorData {
        arguments: parse_constructor_arguments(signature.inputs)?,
        return_type: parse_constructor_return_type(signature.output, &self_type)?,
        identifier: signature.ident,
        self_type,
    })
}

fn parse_constructor_arguments(inputs: Punctuated<FnArg, Comma>) -> SynResult<Vec<ArgumentData>> {
    inputs
        .into_iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(arg) => Some(parse_argument(arg)),
            FnArg::Receiver(_) => None,
        })
        .collect()
}

fn parse_argument(arg: PatType) -> SynResult<ArgumentData> {
    let span = arg.span();
    let (named, fallback) = parse_argument_attributes(arg.attrs)?;

    let name = match (named, arg.pat.as_ref()) {
        (Some(name), _) => name,
        (None, Pat::Ident(PatIdent { ident, .. })) => {
            LitStr::new(&ident.unraw().to_string(), ident.span())
        }
        (None, pat) => {
            return Err(SynError::new(
                pat.span(),
                "expects an identifier pattern, or a name given by `#[named(...)]`",
            ))
        }
    };

    Ok(ArgumentData {
        span,
        name,
        ty: *arg.ty,
        fallback,
    })
}

fn parse_argument_attributes(attrs: Vec<Attribute>) -> SynResult<(Option<LitStr>, FallbackData)> {
    let mut named = None;
    let mut fallback = FallbackData::None;

    for attr in attrs {
        let is_named = attr.path().is_ident("named");
        let is_default = attr.path().is_ident("default");
        if !is_named && !is_default {
            continue;
        }

        let attr_span = attr.span();
        if is_named {
            if named.is_some() {
                return Err(SynError::new(attr_span, "only one `#[named(...)]` is allowed"));
            }
            let Meta::List(list) = attr.meta else {
                return Err(SynError::new(
                    attr_span,
                    "expects `#[named(...)]` to receive a string literal",
                ));
            };
            named = Some(syn::parse2::<LitStr>(list.tokens)?);
        } else {
            if !matches!(fallback, FallbackData::None) {
                return Err(SynError::new(attr_span, "only one `#[default]` is allowed"));
            }
            fallback = match attr.meta {
                Meta::Path(_) => FallbackData::Default,
                Meta::List(list) => FallbackData::Expr(list.tokens),
                Meta::NameValue(_) => {
                    return Err(SynError::new(
                        attr_span,
                        "expects `#[default]` or `#[default(expr)]`",
                    ))
                }
            };
        }
    }

    Ok((named, fallback))
}

const RETURN_TYPE_ERROR: &str = "a constructor's return type should be `Self` or `Result<Self, E>`";

fn parse_constructor_return_type(
    output: ReturnType,
    self_type: &TypePath,
) -> SynResult<ReturnTypeData> {
    let ReturnType::Type(_, return_type) = output else {
        return Err(SynError::new(output.span(), RETURN_TYPE_ERROR));
    };
    let Type::Path(return_type) = *return_type else {
        return Err(SynError::new(return_type.span(), RETURN_TYPE_ERROR));
    };

    if is_self_type(&return_type, self_type) {
        return Ok(ReturnTypeData::Infallible);
    }

    let idents: Vec<_> = return_type
        .path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect();
    let is_result = matches!(
        idents.iter().map(String::as_str).collect::<Vec<_>>().as_slice(),
        ["Result"] | ["std", "result", "Result"] | ["core", "result", "Result"]
    );

    match return_type.path.segments.last() {
        Some(last) if is_result => parse_result_return_type(&last.arguments, self_type),
        _ => Err(SynError::new(return_type.span(), RETURN_TYPE_ERROR)),
    }
}

fn is_self_type(ty: &TypePath, self_type: &TypePath) -> bool {
    ty == self_type
        || (ty.path.segments.len() == 1
            && ty.path.segments.first().is_some_and(|s| s.ident == "Self"))
}

fn parse_result_return_type(
    type_args: &PathArguments,
    self_type: &TypePath,
) -> SynResult<ReturnTypeData> {
    let PathArguments::AngleBracketed(AngleBracketedGenericArguments { args, .. }) = type_args
    else {
        return Err(SynError::new(type_args.span(), RETURN_TYPE_ERROR));
    };

    let mut args = args.iter();
    match (args.next(), args.next(), args.next()) {
        (
            Some(GenericArgument::Type(Type::Path(ok_type))),
            Some(GenericArgument::Type(Type::Path(error_type))),
            None,
        ) if is_self_type(ok_type, self_type) => Ok(ReturnTypeData::Result {
            error_type: error_type.clone(),
        }),
        _ => Err(SynError::new(type_args.span(), RETURN_TYPE_ERROR)),
    }
}

fn expand_component_implementation(
    ctor_data: ConstructorData,
    attr_data: AttributeData,
) -> SynResult<TokenStream2> {
    let self_type = &ctor_data.self_type;
    let constructor = &ctor_data.identifier;

    let associated_type_constructed = if let AttributeData::Full { output_type, .. } = &attr_data {
        quote! { type Constructed = #output_type; }
    } else {
        quote! { type Constructed = #self_type; }
    };

    let associated_type_error =
        if let ReturnTypeData::Result { error_type } = &ctor_data.return_type {
            quote! { type Error = #error_type; }
        } else {
            quote! { type Error = ::std::convert::Infallible; }
        };

    let parameter_names = ctor_data
        .arguments
        .iter()
        .map(|arg| {
            let name = &arg.name;
            quote! { #name, }
        })
        .collect::<TokenStream2>();

    let get_dep_statements = ctor_data
        .arguments
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            let dep = Ident::new(&format!("dep{i}"), arg.span);
            let name = &arg.name;
            let ty = &arg.ty;
            match &arg.fallback {
                FallbackData::None => quote! { let #dep: #ty = resolver.param(#name)?; },
                FallbackData::Default => quote! {
                    let #dep: #ty = resolver.param_or_else(#name, ::std::default::Default::default)?;
                },
                FallbackData::Expr(expr) => quote! {
                    let #dep: #ty = resolver.param_or_else(#name, || #expr)?;
                },
            }
        })
        .collect::<TokenStream2>();

    let dep_args = ctor_data
        .arguments
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            let dep = Ident::new(&format!("dep{i}"), arg.span);
            quote! { #dep, }
        })
        .collect::<TokenStream2>();

    let wire_deps = if let ReturnTypeData::Infallible = &ctor_data.return_type {
        quote! { Ok(Ok(<#self_type>::#constructor(#dep_args))) }
    } else {
        quote! { Ok(<#self_type>::#constructor(#dep_args)) }
    };

    let post_process_body = if let AttributeData::Full { post_processor, .. } = &attr_data {
        quote! { #post_processor(self) }
    } else {
        quote! { self }
    };

    Ok(quote! {
        impl ::knit::provider::component::Component for #self_type {
            #associated_type_constructed
            #associated_type_error

            fn parameters() -> &'static [&'static str] {
                &[#parameter_names]
            }

            fn construct<R>(resolver: &R) -> ::std::result::Result<
                ::std::result::Result<Self, Self::Error>,
                ::knit::container::injector::InjectorError
            >
            where
                R: ::knit::container::injector::TypedResolve + ?Sized
            {
                #get_dep_statements
                #wire_deps
            }

            fn post_process(self) -> Self::Constructed {
                #post_process_body
            }
        }
    })
}
