//! Fixture type descriptors shared by unit tests.

use crate::core::member::{Parameter, Visibility};
use crate::core::ty::Ty;
use crate::core::type_desc::TypeDescriptor;

/// `Widget`, a type with a mix of protected and public members.
///
/// ```text
/// class Widget {
///     protected virtual string Format(int n);
///     protected virtual string Format(string s);
///     protected virtual void Reset();
///     protected virtual bool TryParse(string s, ref int value);
///     protected internal virtual void Log(object message);
///     public virtual void Render();
///     protected static Widget Create();
///
///     public string Title { get; set; }
///     protected int Count { get; }
///     protected string Label { get; set; }
///     protected long Total { get; set; }
///     public int Size { get; protected set; }
///     protected int Secret { set; }
/// }
/// ```
pub fn widget() -> TypeDescriptor {
    TypeDescriptor::builder("Widget")
        .method(
            Visibility::Protected,
            "Format",
            vec![Parameter::new("n", Ty::int())],
            Ty::string(),
        )
        .method(
            Visibility::Protected,
            "Format",
            vec![Parameter::new("s", Ty::string())],
            Ty::string(),
        )
        .method(Visibility::Protected, "Reset", vec![], Ty::void())
        .method(
            Visibility::Protected,
            "TryParse",
            vec![
                Parameter::new("s", Ty::string()),
                Parameter::new("value", Ty::int().by_ref()),
            ],
            Ty::bool(),
        )
        .method(
            Visibility::ProtectedInternal,
            "Log",
            vec![Parameter::new("message", Ty::object())],
            Ty::void(),
        )
        .method(Visibility::Public, "Render", vec![], Ty::void())
        .static_method(
            Visibility::Protected,
            "Create",
            vec![],
            Ty::class("Widget", None),
        )
        .property(
            "Title",
            Ty::string(),
            Some(Visibility::Public),
            Some(Visibility::Public),
        )
        .property("Count", Ty::int(), Some(Visibility::Protected), None)
        .property(
            "Label",
            Ty::string(),
            Some(Visibility::Protected),
            Some(Visibility::Protected),
        )
        .property(
            "Total",
            Ty::long(),
            Some(Visibility::Protected),
            Some(Visibility::Protected),
        )
        .property(
            "Size",
            Ty::int(),
            Some(Visibility::Public),
            Some(Visibility::Protected),
        )
        .property("Secret", Ty::int(), None, Some(Visibility::Protected))
        .build()
}

pub fn animal_ty() -> Ty {
    Ty::class("Animal", None)
}

pub fn dog_ty() -> Ty {
    Ty::class("Dog", Some(animal_ty()))
}

/// `Shelter`, with overloads that only differ by reference-type hierarchy.
///
/// ```text
/// class Shelter {
///     protected virtual void Admit(Animal a);
///     protected virtual void Admit(object o);
///     protected virtual int Capacity(Dog d);
/// }
/// ```
pub fn shelter() -> TypeDescriptor {
    TypeDescriptor::builder("Shelter")
        .method(
            Visibility::Protected,
            "Admit",
            vec![Parameter::new("a", animal_ty())],
            Ty::void(),
        )
        .method(
            Visibility::Protected,
            "Admit",
            vec![Parameter::new("o", Ty::object())],
            Ty::void(),
        )
        .method(
            Visibility::Protected,
            "Capacity",
            vec![Parameter::new("d", dog_ty())],
            Ty::int(),
        )
        .build()
}

/// `FancyWidget : Widget`, overriding `Reset` and adding `Polish`.
pub fn fancy_widget() -> TypeDescriptor {
    TypeDescriptor::builder_for(Ty::class("FancyWidget", Some(Ty::class("Widget", None))))
        .inherit(&widget())
        .method(Visibility::Protected, "Reset", vec![], Ty::void())
        .method(
            Visibility::Protected,
            "Polish",
            vec![Parameter::new("times", Ty::int())],
            Ty::void(),
        )
        .build()
}
