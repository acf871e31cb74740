use syn::*;
use quote::*;
use syn::spanned::Spanned;
use proc_macro2::TokenStream;
use std::collections::HashMap;

const PACKET_ATTRIBUTE: &str = "packet";

const TYPE_ATTRIBUTE: &str = "type";
const ID_ATTRIBUTE: &str = "id";

pub fn derive(ast: &DeriveInput) -> Result<TokenStream> {
    let Data::Enum(data) = &ast.data else {
        return Err(Error::new(ast.span(), "PacketSerialization can only be derived for enums"));
    };

    let packet_attrs = PacketAttrs::parse(&ast.attrs)?;
    let enum_name = &ast.ident;
    let name = enum_name.to_string();
    let type_ = packet_attrs.type_.unwrap_or_else(|| format_ident!("u8"));
    let max_id = match type_.to_string().as_str() {
        "u8" => u8::MAX as u16,
        "u16" => u16::MAX,
        other => return Err(Error::new(type_.span(), format!("unsupported packet id type {other}, use u8 or u16"))),
    };

    let mut id_map: HashMap<u16, &Ident> = HashMap::new();

    let mut read_arms = Vec::new();
    let mut write_arms = Vec::new();

    for v in data.variants.iter() {
        let variant_name = &v.ident;
        let variant_attrs = PacketAttrs::parse(&v.attrs)?;

        let Some(id) = variant_attrs.id else {
            return Err(Error::new(v.span(), format!("Variant has no id!! {variant_name}")));
        };
        if id > max_id {
            return Err(Error::new(v.span(), format!("Id {id} does not fit in {type_}")));
        }
        if let Some(variant) = id_map.insert(id, variant_name) {
            return Err(Error::new(v.span(), format!("Id {id} already used by variant {variant}")));
        }

        match &v.fields {
            Fields::Unit => {
                read_arms.push(quote! { #id => Self::#variant_name, });
                write_arms.push(quote! { Self::#variant_name => sw.write(&(#id as #type_)), });
            }
            Fields::Named(named) => {
                let fields = named.named.iter()
                    .filter_map(|f| f.ident.as_ref())
                    .collect::<Vec<_>>();

                read_arms.push(quote! {
                    #id => Self::#variant_name { #( #fields: sr.read(stringify!(#fields))?, )* },
                });
                write_arms.push(quote! {
                    Self::#variant_name { #(#fields),* } => {
                        sw.write(&(#id as #type_));
                        #( sw.write(#fields); )*
                    }
                });
            }
            Fields::Unnamed(_) => {
                return Err(Error::new(v.span(), format!("Variant {variant_name} must use named fields")));
            }
        }
    }

    if read_arms.is_empty() {
        return Err(Error::new(ast.span(), "Packet list is empty?"));
    }

    #[allow(unused_mut)] // must be mut when packet_logging is enabled
    let mut debug_read_line = TokenStream::new();
    #[cfg(feature = "packet_logging")] {
        debug_read_line = quote! {
            ::tracing::trace!(packet_id, packet = #name, "reading packet");
        }
    }

    Ok(quote! {
        impl crate::serialization::Serializable for #enum_name {
            fn read(sr: &mut crate::serialization::SerializationReader) -> crate::serialization::SerializationResult<Self> {
                sr.push_parent(#name);
                let result = (|sr: &mut crate::serialization::SerializationReader| -> crate::serialization::SerializationResult<Self> {
                    let packet_id = sr.read::<#type_>("packet_id")? as u16;
                    #debug_read_line

                    Ok(match packet_id {
                        #( #read_arms )*
                        _ => return Err(crate::serialization::SerializationError::unknown_packet_id(#name, packet_id)),
                    })
                })(sr);
                sr.pop_parent();
                result
            }

            fn write(&self, sw: &mut crate::serialization::SerializationWriter) {
                match self {
                    #( #write_arms )*
                }
            }
        }
    })
}


#[derive(Default)]
struct PacketAttrs {
    // container attrs
    type_: Option<Ident>,

    // variant attrs
    id: Option<u16>,
}
impl PacketAttrs {
    fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut this = Self::default();

        for a in attrs {
            if !a.path().is_ident(PACKET_ATTRIBUTE) { continue }

            a.parse_nested_meta(|meta| {
                if meta.path.is_ident(TYPE_ATTRIBUTE) {
                    let value: LitStr = meta.value()?.parse()?;
                    this.type_ = Some(format_ident!("{}", value.value()));
                } else if meta.path.is_ident(ID_ATTRIBUTE) {
                    let value: LitInt = meta.value()?.parse()?;
                    this.id = Some(value.base10_parse::<u16>()?);
                } else {
                    return Err(meta.error("invalid attribute"))
                }

                Ok(())
            })?;
        }

        Ok(this)
    }
}
