//! Derive macros for task list action enums
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates helpers for action enums (commands/events)
//!
//! # Example
//!
//! ```ignore
//! use tasklist_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TaskAction {
//!     #[command]
//!     AddTask { raw_text: String },
//!
//!     #[event]
//!     TaskAdded { id: String, text: String },
//! }
//!
//! assert!(TaskAction::AddTask { raw_text: "milk".into() }.is_command());
//! assert_eq!(TaskAction::TaskAdded { id: "1".into(), text: "milk".into() }.event_type(), "TaskAdded.v1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Variant, parse_macro_input};

/// Derive macro for Action enums
///
/// Generates helper methods for action enums:
/// - `is_command()` - Returns true if this variant is a command
/// - `is_event()` - Returns true if this variant is an event
/// - `event_type()` - Returns the versioned event type name (`"TaskAdded.v1"`)
/// - `action_name()` - Returns the variant name for every variant, used as a
///   structured logging field
///
/// # Attributes
///
/// - `#[command]` - Mark a variant as a command
/// - `#[event]` - Mark a variant as an event
///
/// Unmarked variants are neither commands nor events.
///
/// # Errors
///
/// Produces a compile error if:
/// - Applied to a non-enum type
/// - A variant has both `#[command]` and `#[event]` attributes
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(&input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut is_command_arms = Vec::new();
    let mut is_event_arms = Vec::new();
    let mut event_type_arms = Vec::new();
    let mut action_name_arms = Vec::new();

    for variant in &data_enum.variants {
        let is_command = has_attribute(&variant.attrs, "command");
        let is_event = has_attribute(&variant.attrs, "event");

        if is_command && is_event {
            return syn::Error::new_spanned(
                variant,
                "Variant cannot be both #[command] and #[event]",
            )
            .to_compile_error()
            .into();
        }

        let pattern = variant_pattern(variant);
        let variant_name = variant.ident.to_string();

        if is_command {
            is_command_arms.push(quote! { #pattern => true, });
        }

        if is_event {
            let type_name = format!("{variant_name}.v1");
            is_event_arms.push(quote! { #pattern => true, });
            event_type_arms.push(quote! { #pattern => #type_name, });
        }

        action_name_arms.push(quote! { #pattern => #variant_name, });
    }

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns true if this action is a command
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_command(&self) -> bool {
                match self {
                    #(#is_command_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is an event
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_event(&self) -> bool {
                match self {
                    #(#is_event_arms)*
                    _ => false,
                }
            }

            /// Returns the event type name for serialization
            ///
            /// Only events have type names. Commands return "unknown".
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn event_type(&self) -> &'static str {
                match self {
                    #(#event_type_arms)*
                    _ => "unknown",
                }
            }

            /// Returns the variant name of this action
            #[must_use]
            pub const fn action_name(&self) -> &'static str {
                match self {
                    #(#action_name_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Builds a match pattern that ignores the variant's fields
fn variant_pattern(variant: &Variant) -> TokenStream2 {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
