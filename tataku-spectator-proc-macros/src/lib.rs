mod packets;
mod serializable;

use proc_macro::TokenStream;

// automatic read/write for packet enums
#[proc_macro_derive(PacketSerialization, attributes(packet))]
pub fn packet_serialization(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);

    match packets::derive(&ast) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.into_compile_error().into(),
    }
}

// automatic read/write for plain structs, fields are read in declaration order
#[proc_macro_derive(Serializable)]
pub fn serializable(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);

    match serializable::derive(&ast) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.into_compile_error().into(),
    }
}
