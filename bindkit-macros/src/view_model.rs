use crate::field_utils::ensure_field;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use std::collections::HashSet;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{
    Attribute, Field, GenericArgument, Ident, Item, LitStr, PathArguments, Result, Type,
    parse_macro_input,
};

const EVENT_FIELD: &str = "property_changed";

/// #[view_model] 宏实现
/// - 若缺失则追加字段：`property_changed: PropertyChangedEvent`，置于字段最前
/// - 收集 `#[property]` 字段，生成读取/写入方法，并剥离辅助属性
/// - 实现 `NotifyPropertyChanged` 与 `BindingContext`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[view_model] does not take arguments",
        )
        .to_compile_error()
        .into();
    }

    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[view_model] only on struct")
                .to_compile_error()
                .into();
        }
    };

    // 仅支持具名字段结构体
    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let properties = match collect_properties(fields_named.named.iter_mut()) {
        Ok(p) => p,
        Err(err) => return err.to_compile_error().into(),
    };

    let event_ty: Type = syn::parse_quote! { ::bindkit_command::PropertyChangedEvent };
    ensure_field(fields_named, EVENT_FIELD, &event_ty);
    let event_field = format_ident!("{}", EVENT_FIELD);

    let ident = &st.ident;
    let vis = &st.vis;
    let generics = st.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let accessors = properties.iter().map(|p| {
        let field = &p.ident;
        let inner = &p.inner;
        let name = &p.name;
        let setter = format_ident!("set_{}", field);

        quote! {
            #vis fn #field(&self) -> #inner {
                ::bindkit_command::Property::get(&self.#field)
            }

            #vis fn #setter(&self, value: #inner) -> bool {
                ::bindkit_command::NotifyPropertyChanged::set_property(
                    self,
                    &self.#field,
                    value,
                    #name,
                )
            }
        }
    });

    let expanded = quote! {
        #st

        impl #impl_generics #ident #ty_generics #where_clause {
            #( #accessors )*
        }

        impl #impl_generics ::bindkit_command::NotifyPropertyChanged for #ident #ty_generics #where_clause {
            fn property_changed(&self) -> &::bindkit_command::PropertyChangedEvent {
                &self.#event_field
            }
        }

        impl #impl_generics ::bindkit_command::BindingContext for #ident #ty_generics #where_clause {
            fn as_notify_property_changed(
                &self,
            ) -> ::std::option::Option<&dyn ::bindkit_command::NotifyPropertyChanged> {
                ::std::option::Option::Some(self)
            }
        }
    };

    TokenStream::from(expanded)
}

struct PropertyField {
    ident: Ident,
    inner: Type,
    name: LitStr,
}

fn collect_properties<'a>(fields: impl Iterator<Item = &'a mut Field>) -> Result<Vec<PropertyField>> {
    let mut properties = Vec::new();
    let mut names = HashSet::new();

    for field in fields {
        let Some(cfg) = take_property_attr(field)? else {
            continue;
        };
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        let inner = property_inner_type(&field.ty).cloned().ok_or_else(|| {
            syn::Error::new(
                field.ty.span(),
                "#[property] fields must be of type Property<T>",
            )
        })?;

        let name = cfg
            .name
            .unwrap_or_else(|| LitStr::new(&ident.unraw().to_string(), ident.span()));

        if name.value().is_empty() {
            return Err(syn::Error::new(name.span(), "property name cannot be empty"));
        }
        if !names.insert(name.value()) {
            return Err(syn::Error::new(
                name.span(),
                format!("duplicate property name '{}'", name.value()),
            ));
        }

        properties.push(PropertyField { ident, inner, name });
    }

    Ok(properties)
}

// 取出并移除字段上的 #[property]，其余属性原样保留
fn take_property_attr(field: &mut Field) -> Result<Option<PropertyAttrConfig>> {
    let mut found: Option<PropertyAttrConfig> = None;
    let mut retained = Vec::new();

    for attr in std::mem::take(&mut field.attrs) {
        if !attr.path().is_ident("property") {
            retained.push(attr);
            continue;
        }
        if found.is_some() {
            return Err(syn::Error::new(
                attr.span(),
                "duplicate #[property] attribute on field",
            ));
        }
        found = Some(parse_property_attr(&attr)?);
    }

    field.attrs = retained;
    Ok(found)
}

// Property<T> -> T
fn property_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let last = type_path.path.segments.last()?;
    if last.ident != "Property" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

// -------- parsing --------

// 解析字段参数：#[property] 或 #[property(name = "...")]
struct PropertyAttrConfig {
    name: Option<LitStr>,
}

fn parse_property_attr(attr: &Attribute) -> Result<PropertyAttrConfig> {
    match &attr.meta {
        syn::Meta::Path(_) => Ok(PropertyAttrConfig { name: None }),
        syn::Meta::List(_) => {
            let mut name: Option<LitStr> = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    if name.is_some() {
                        return Err(meta.error("duplicate key 'name' in attribute"));
                    }
                    name = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown key in attribute; expected 'name'"))
                }
            })?;
            Ok(PropertyAttrConfig { name })
        }
        other => Err(syn::Error::new(
            other.span(),
            "expected #[property] or #[property(name = \"...\")]",
        )),
    }
}
