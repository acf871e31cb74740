use syn::*;
use quote::*;
use syn::spanned::Spanned;
use proc_macro2::TokenStream;

pub fn derive(ast: &DeriveInput) -> Result<TokenStream> {
    let struct_name = &ast.ident;
    let name = struct_name.to_string();

    let Data::Struct(data) = &ast.data else {
        return Err(Error::new(ast.span(), "Serializable can only be derived for structs"));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(Error::new(ast.span(), format!("{name} must use named fields")));
    };

    let fields = named.named.iter()
        .filter_map(|f| f.ident.as_ref())
        .collect::<Vec<_>>();

    Ok(quote! {
        impl crate::serialization::Serializable for #struct_name {
            fn read(sr: &mut crate::serialization::SerializationReader) -> crate::serialization::SerializationResult<Self> {
                sr.push_parent(#name);
                let result = (|sr: &mut crate::serialization::SerializationReader| -> crate::serialization::SerializationResult<Self> {
                    Ok(Self {
                        #( #fields: sr.read(stringify!(#fields))?, )*
                    })
                })(sr);
                sr.pop_parent();
                result
            }

            fn write(&self, sw: &mut crate::serialization::SerializationWriter) {
                #( sw.write(&self.#fields); )*
            }
        }
    })
}
