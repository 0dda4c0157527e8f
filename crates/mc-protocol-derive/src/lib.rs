use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Expr, Fields, LitStr, parse_macro_input};

#[proc_macro_derive(Encode)]
pub fn derive_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let encode_body = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => {
                let field_encodes = fields.named.iter().map(|f| {
                    let field_name = &f.ident;
                    quote! {
                        mc_protocol::Encode::encode(&self.#field_name, buf);
                    }
                });
                quote! { #(#field_encodes)* }
            }
            Fields::Unnamed(fields) => {
                let field_encodes = (0..fields.unnamed.len()).map(|i| {
                    let index = syn::Index::from(i);
                    quote! {
                        mc_protocol::Encode::encode(&self.#index, buf);
                    }
                });
                quote! { #(#field_encodes)* }
            }
            Fields::Unit => quote! { let _ = buf; },
        },
        Data::Enum(_) => {
            quote! {
                compile_error!("Encode derive does not support enums");
            }
        }
        Data::Union(_) => {
            quote! {
                compile_error!("Encode derive does not support unions");
            }
        }
    };

    let expanded = quote! {
        impl #impl_generics mc_protocol::Encode for #name #ty_generics #where_clause {
            fn encode<B: mc_protocol::bytes::BufMut>(&self, buf: &mut B) {
                #encode_body
            }
        }
    };

    TokenStream::from(expanded)
}

/// `#[packet(id = <expr>, name = "<name>")]`
#[proc_macro_derive(Packet, attributes(packet))]
pub fn derive_packet(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut id: Option<Expr> = None;
    let mut packet_name: Option<LitStr> = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("packet")) {
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                id = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("name") {
                packet_name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `id` or `name`"))
            }
        });
        if let Err(err) = parsed {
            return err.to_compile_error().into();
        }
    }

    let Some(id) = id else {
        return syn::Error::new_spanned(name, "missing #[packet(id = ...)]")
            .to_compile_error()
            .into();
    };
    let packet_name =
        packet_name.unwrap_or_else(|| LitStr::new(&name.to_string(), name.span()));

    let expanded = quote! {
        impl #impl_generics mc_protocol::Packet for #name #ty_generics #where_clause {
            const ID: u8 = #id;
            const NAME: &'static str = #packet_name;
        }
    };

    TokenStream::from(expanded)
}
