//! Procedural macros for tui-controls

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::Ident;
use quote::{format_ident, quote};
use std::collections::BTreeMap;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Group variants into categories by their leading word
    #[darling(default)]
    categories: bool,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit category override
    #[darling(default)]
    category: Option<String>,

    /// Leave this variant uncategorized
    #[darling(default)]
    skip_category: bool,
}

/// Split a PascalCase string into words
fn split_pascal_case(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, ch) in s.char_indices().skip(1) {
        if ch.is_uppercase() {
            parts.push(&s[start..i]);
            start = i;
        }
    }
    if start < s.len() {
        parts.push(&s[start..]);
    }
    parts
}

/// Convert PascalCase to snake_case
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

/// Category of a variant name: its leading word, when there is more than one
///
/// `PageSet` -> `page`, `StorySelect` -> `story`, `Quit` -> none.
fn infer_category(name: &str) -> Option<String> {
    match split_pascal_case(name).as_slice() {
        [first, _, ..] => Some(to_snake_case(first)),
        _ => None,
    }
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method that returns the variant name as a static string.
///
/// With `#[action(categories)]`, also implements `ActionCategory` and adds an
/// `is_{category}()` predicate per category. A variant's category is the
/// snake_case form of the first word of its name; override it with
/// `#[action(category = "...")]` or opt out with `#[action(skip_category)]`.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(categories)]
/// enum CatalogAction {
///     StorySelect(usize),
///     PageSet(i64),
///     PageDidFail(String),
///     #[action(category = "page")]
///     Refresh,
///     Quit,
/// }
///
/// assert_eq!(CatalogAction::PageSet(2).name(), "PageSet");
/// assert_eq!(CatalogAction::PageSet(2).category(), Some("page"));
/// assert!(CatalogAction::Refresh.is_page());
/// assert_eq!(CatalogAction::Quit.category(), None);
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let variant_str = variant_name.to_string();

        match &v.fields.style {
            darling::ast::Style::Unit => quote! {
                #name::#variant_name => #variant_str
            },
            darling::ast::Style::Tuple => quote! {
                #name::#variant_name(..) => #variant_str
            },
            darling::ast::Style::Struct => quote! {
                #name::#variant_name { .. } => #variant_str
            },
        }
    });

    let mut expanded = quote! {
        impl tui_controls::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    if opts.categories {
        let mut categories: BTreeMap<String, Vec<&Ident>> = BTreeMap::new();
        let mut category_arms = Vec::with_capacity(variants.len());

        for v in variants.iter() {
            let category = if v.skip_category {
                None
            } else if let Some(explicit) = &v.category {
                Some(explicit.clone())
            } else {
                infer_category(&v.ident.to_string())
            };

            let variant = &v.ident;
            let category_expr = match &category {
                Some(c) => quote! { ::core::option::Option::Some(#c) },
                None => quote! { ::core::option::Option::None },
            };
            category_arms.push(quote! { #name::#variant { .. } => #category_expr });

            if let Some(category) = category {
                categories.entry(category).or_default().push(variant);
            }
        }

        let predicates = categories.iter().map(|(category, members)| {
            let predicate_name = format_ident!("is_{}", category);
            let patterns = members.iter().map(|v| quote! { #name::#v { .. } });
            let doc = format!(
                "Returns true if this action belongs to the `{}` category.",
                category
            );

            quote! {
                #[doc = #doc]
                pub fn #predicate_name(&self) -> bool {
                    matches!(self, #(#patterns)|*)
                }
            }
        });

        let category_names = categories.keys();

        expanded = quote! {
            #expanded

            impl #name {
                /// Every category used by this action type, sorted
                pub const CATEGORIES: &'static [&'static str] = &[#(#category_names),*];

                /// Get the action's category (if categorized)
                pub fn category(&self) -> ::core::option::Option<&'static str> {
                    match self {
                        #(#category_arms,)*
                    }
                }

                #(#predicates)*
            }

            impl tui_controls::ActionCategory for #name {
                fn category(&self) -> ::core::option::Option<&'static str> {
                    #name::category(self)
                }
            }
        };
    }

    TokenStream::from(expanded)
}

/// Derive macro for the BindingContext trait
///
/// Generates `name()`, `from_name()` and `all()`. The context name is the
/// variant name in snake_case.
///
/// # Example
/// ```ignore
/// #[derive(BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
/// enum CatalogContext {
///     Sidebar,
///     Canvas,
///     StoryCanvas,
/// }
///
/// assert_eq!(CatalogContext::StoryCanvas.name(), "story_canvas");
/// assert_eq!(CatalogContext::from_name("canvas"), Some(CatalogContext::Canvas));
/// ```
#[proc_macro_derive(BindingContext)]
pub fn derive_binding_context(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let data = match &input.data {
        syn::Data::Enum(data) => data,
        _ => {
            return syn::Error::new_spanned(&input, "BindingContext can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    if let Some(variant) = data
        .variants
        .iter()
        .find(|v| !matches!(v.fields, syn::Fields::Unit))
    {
        return syn::Error::new_spanned(
            variant,
            "BindingContext can only be derived for enums with unit variants",
        )
        .to_compile_error()
        .into();
    }

    let variant_names: Vec<_> = data.variants.iter().map(|v| &v.ident).collect();
    let variant_strings: Vec<_> = variant_names
        .iter()
        .map(|v| to_snake_case(&v.to_string()))
        .collect();

    let name_arms = variant_names
        .iter()
        .zip(&variant_strings)
        .map(|(v, s)| quote! { #name::#v => #s });

    let from_name_arms = variant_names
        .iter()
        .zip(&variant_strings)
        .map(|(v, s)| quote! { #s => ::core::option::Option::Some(#name::#v) });

    let expanded = quote! {
        impl tui_controls::BindingContext for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }

            fn from_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #(#from_name_arms,)*
                    _ => ::core::option::Option::None,
                }
            }

            fn all() -> &'static [Self] {
                static ALL: &[#name] = &[#(#name::#variant_names),*];
                ALL
            }
        }
    };

    TokenStream::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pascal_case() {
        assert_eq!(split_pascal_case("PageDidFail"), vec!["Page", "Did", "Fail"]);
        assert_eq!(split_pascal_case("Quit"), vec!["Quit"]);
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("StoryCanvas"), "story_canvas");
        assert_eq!(to_snake_case("Sidebar"), "sidebar");
    }

    #[test]
    fn test_infer_category() {
        assert_eq!(infer_category("PageSet").as_deref(), Some("page"));
        assert_eq!(infer_category("StorySelect").as_deref(), Some("story"));
        assert_eq!(infer_category("Quit"), None);
    }
}
