mod primitive;

use std::{
    cell::Cell,
    collections::HashSet,
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Weak,
    },
};

use once_cell::sync::Lazy;
use parking_lot::{ReentrantMutex, RwLock};
use ruyi_assert::{failed_msg, require_non_blank, require_true, Result};

pub use self::primitive::PrimitiveType;
use crate::{
    member::{Field, Member, Method, Modifiers},
    resolve::ARRAY_SUFFIX,
    static_type_map::StaticTypeMap,
};

/// The name of the root type every struct and array type derives from.
pub const OBJECT_TYPE_NAME: &str = "core::Object";

/// The name of the string type.
pub const STRING_TYPE_NAME: &str = "core::String";

/// A function that is run the first time a type is initialized.
type Initializer = Box<dyn Fn(&Type) + Send + Sync>;

/// A handle to a type description.
///
/// Handles are cheap to clone. Two handles are equal if they refer to the same type description;
/// two types built separately are different types even if they share a name.
#[derive(Clone)]
pub struct Type {
    inner: Arc<TypeInner>,
}

struct TypeInner {
    /// Type name
    name: String,

    /// Type group
    data: TypeData,

    /// The type of a one-dimensional array of this type, if one is alive
    array_type: RwLock<Weak<TypeInner>>,

    /// Run once on initialization
    initializer: Option<Initializer>,

    /// Set once the initializer completed
    initialized: AtomicBool,

    /// Serializes initialization across threads; the flag is set while this type's initializer runs
    initializing: ReentrantMutex<Cell<bool>>,
}

/// The data specific to a group of types.
pub(crate) enum TypeData {
    /// Primitive types (i.e. `int`, `boolean`, `void`, etc.)
    Primitive(PrimitiveType),
    /// Struct types with fields and methods
    Struct(StructInfo),
    /// A one-dimensional array of another type
    Array(ArrayInfo),
}

pub(crate) struct StructInfo {
    /// The type this struct derives from, `None` only for the root type
    super_type: Option<Type>,
    modifiers: Modifiers,
    fields: Vec<FieldInfo>,
    methods: Vec<MethodInfo>,
}

pub(crate) struct ArrayInfo {
    element: Type,
}

/// A field declared by a struct.
pub(crate) struct FieldInfo {
    pub name: String,
    pub ty: Type,
    pub modifiers: Modifiers,
}

/// A method declared by a struct.
pub(crate) struct MethodInfo {
    pub name: String,
    pub parameters: Vec<Type>,
    pub return_type: Type,
    pub modifiers: Modifiers,
}

/// Describes which kind of type a [`Type`] is.
#[derive(Clone, Copy)]
pub enum TypeKind<'t> {
    /// Primitive types (i.e. `int`, `boolean`, `void`, etc.)
    Primitive(PrimitiveType),
    /// Struct types with fields and methods
    Struct(StructType<'t>),
    /// A one-dimensional array of another type
    Array(ArrayType<'t>),
}

/// Reference information of a struct
#[derive(Clone, Copy)]
pub struct StructType<'t> {
    ty: &'t Type,
    inner: &'t StructInfo,
}

impl<'t> StructType<'t> {
    /// Returns the type this struct derives from.
    pub fn super_type(&self) -> Option<&'t Type> {
        self.inner.super_type.as_ref()
    }

    /// Returns the modifiers of the struct
    pub fn modifiers(&self) -> Modifiers {
        self.inner.modifiers
    }

    /// Returns true if the struct cannot be derived from.
    pub fn is_final(&self) -> bool {
        self.inner.modifiers.contains(Modifiers::FINAL)
    }

    /// Returns an iterator over the fields declared by this struct, in declaration order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = Field<'t>> + 't {
        let ty = self.ty;
        self.inner
            .fields
            .iter()
            .map(move |info| Field::new(ty, info))
    }

    /// Returns an iterator over the methods declared by this struct, in declaration order.
    pub fn methods(&self) -> impl ExactSizeIterator<Item = Method<'t>> + 't {
        let ty = self.ty;
        self.inner
            .methods
            .iter()
            .map(move |info| Method::new(ty, info))
    }

    /// Returns the declared field with the given name.
    pub fn field_by_name(&self, name: impl AsRef<str>) -> Option<Field<'t>> {
        let name = name.as_ref();
        self.fields().find(|field| field.name() == name)
    }

    /// Returns the first declared method with the given name.
    pub fn method_by_name(&self, name: impl AsRef<str>) -> Option<Method<'t>> {
        let name = name.as_ref();
        self.methods().find(|method| method.name() == name)
    }
}

/// Reference information of an array
#[derive(Clone, Copy)]
pub struct ArrayType<'t> {
    inner: &'t ArrayInfo,
}

impl<'t> ArrayType<'t> {
    /// Returns the type of the elements stored in the array
    pub fn element_type(&self) -> &'t Type {
        &self.inner.element
    }
}

impl Type {
    /// Allocates a type that is not registered anywhere.
    pub(crate) fn new_unlinked(name: impl Into<String>, data: TypeData) -> Self {
        Self::with_initializer(name, data, None)
    }

    fn with_initializer(
        name: impl Into<String>,
        data: TypeData,
        initializer: Option<Initializer>,
    ) -> Self {
        Self {
            inner: Arc::new(TypeInner {
                name: name.into(),
                data,
                array_type: RwLock::new(Weak::new()),
                initializer,
                initialized: AtomicBool::new(false),
                initializing: ReentrantMutex::new(Cell::new(false)),
            }),
        }
    }

    /// Returns the root type every struct and array type derives from.
    pub fn object() -> &'static Type {
        static OBJECT: Lazy<Type> = Lazy::new(|| {
            Type::new_unlinked(
                OBJECT_TYPE_NAME,
                TypeData::Struct(StructInfo {
                    super_type: None,
                    modifiers: Modifiers::PUBLIC,
                    fields: Vec::new(),
                    methods: Vec::new(),
                }),
            )
        });
        &OBJECT
    }

    /// Returns the string type.
    pub fn string() -> &'static Type {
        static STRING: Lazy<Type> = Lazy::new(|| {
            let int = PrimitiveType::Int.type_info();
            Type::new_unlinked(
                STRING_TYPE_NAME,
                TypeData::Struct(StructInfo {
                    super_type: Some(Type::object().clone()),
                    modifiers: Modifiers::PUBLIC | Modifiers::FINAL,
                    fields: vec![FieldInfo {
                        name: String::from("value"),
                        ty: PrimitiveType::Char.type_info().array_type(),
                        modifiers: Modifiers::PRIVATE | Modifiers::FINAL,
                    }],
                    methods: vec![
                        MethodInfo {
                            name: String::from("length"),
                            parameters: Vec::new(),
                            return_type: int.clone(),
                            modifiers: Modifiers::PUBLIC,
                        },
                        MethodInfo {
                            name: String::from("is_empty"),
                            parameters: Vec::new(),
                            return_type: PrimitiveType::Boolean.type_info().clone(),
                            modifiers: Modifiers::PUBLIC,
                        },
                        MethodInfo {
                            name: String::from("char_at"),
                            parameters: vec![int.clone()],
                            return_type: PrimitiveType::Char.type_info().clone(),
                            modifiers: Modifiers::PUBLIC,
                        },
                    ],
                }),
            )
        });
        &STRING
    }

    pub(crate) fn data(&self) -> &TypeData {
        &self.inner.data
    }

    /// Returns the name of the type
    pub fn name(&self) -> &str {
        self.inner.name.as_str()
    }

    /// Returns the namespace of the type, i.e. everything before the last `::` of its name. Array
    /// types live in the namespace of their element type.
    pub fn package(&self) -> &str {
        match self.data() {
            TypeData::Primitive(_) => "",
            TypeData::Array(a) => a.element.package(),
            TypeData::Struct(_) => self
                .name()
                .rsplit_once("::")
                .map_or("", |(package, _)| package),
        }
    }

    /// Returns the kind of the type
    pub fn kind(&self) -> TypeKind<'_> {
        match self.data() {
            TypeData::Primitive(p) => TypeKind::Primitive(*p),
            TypeData::Struct(s) => TypeKind::Struct(StructType {
                ty: self,
                inner: s,
            }),
            TypeData::Array(a) => TypeKind::Array(ArrayType { inner: a }),
        }
    }

    /// Returns whether this is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(self.data(), TypeData::Primitive(_))
    }

    /// Returns whether this is a struct type.
    pub fn is_struct(&self) -> bool {
        matches!(self.data(), TypeData::Struct(_))
    }

    /// Returns whether this is an array type.
    pub fn is_array(&self) -> bool {
        matches!(self.data(), TypeData::Array(_))
    }

    /// Retrieves the type's primitive information, if available.
    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        PrimitiveType::from_type(self)
    }

    /// Retrieves the type's struct information, if available.
    pub fn as_struct(&self) -> Option<StructType<'_>> {
        if let TypeKind::Struct(s) = self.kind() {
            Some(s)
        } else {
            None
        }
    }

    /// Retrieves the type's array information, if available.
    pub fn as_array(&self) -> Option<ArrayType<'_>> {
        if let TypeKind::Array(a) = self.kind() {
            Some(a)
        } else {
            None
        }
    }

    /// Returns the element type if this is an array type.
    pub fn element_type(&self) -> Option<&Type> {
        match self.data() {
            TypeData::Array(a) => Some(&a.element),
            _ => None,
        }
    }

    /// Returns the number of array dimensions of this type; zero for non-array types.
    pub fn dimensions(&self) -> usize {
        std::iter::successors(self.element_type(), |ty| ty.element_type()).count()
    }

    /// Returns the modifiers of the type. Primitive and array types are public and final.
    pub fn modifiers(&self) -> Modifiers {
        match self.data() {
            TypeData::Struct(s) => s.modifiers,
            TypeData::Primitive(_) | TypeData::Array(_) => Modifiers::PUBLIC | Modifiers::FINAL,
        }
    }

    /// Returns the type this type directly derives from. Arrays derive from the root type,
    /// primitives and the root type itself derive from nothing.
    pub fn super_type(&self) -> Option<&Type> {
        match self.data() {
            TypeData::Struct(s) => s.super_type.as_ref(),
            TypeData::Array(_) => Some(Type::object()),
            TypeData::Primitive(_) => None,
        }
    }

    /// Returns an iterator over this type followed by its super types, up to and including the
    /// root type.
    pub fn ancestors(&self) -> impl Iterator<Item = &Type> {
        std::iter::successors(Some(self), |ty: &&Type| ty.super_type())
    }

    /// Returns true if a value of type `sub` can be used where a value of this type is expected.
    ///
    /// ```rust
    /// # use ruyi_reflect::{HasStaticType, Type};
    /// let strings = Vec::<String>::type_info();
    /// assert!(Type::object().is_assignable_from(strings));
    /// assert!(Type::object().array_type().is_assignable_from(strings));
    /// assert!(!i32::type_info().is_assignable_from(i64::type_info()));
    /// ```
    pub fn is_assignable_from(&self, sub: &Type) -> bool {
        if self == sub {
            return true;
        }

        match (self.data(), sub.data()) {
            // Arrays of primitives only convert to arrays of the same primitive
            (TypeData::Array(sup), TypeData::Array(sub)) => {
                sup.element == sub.element
                    || (!sup.element.is_primitive()
                        && !sub.element.is_primitive()
                        && sup.element.is_assignable_from(&sub.element))
            }
            (TypeData::Primitive(_), _) | (_, TypeData::Primitive(_)) => false,
            _ => sub.ancestors().skip(1).any(|ancestor| ancestor == self),
        }
    }

    /// Returns the type that represents a one-dimensional array of this type.
    ///
    /// The array type is cached; as long as a handle to it is alive, every call returns the same
    /// type.
    pub fn array_type(&self) -> Type {
        {
            let read_lock = self.inner.array_type.read();

            // Fast path, the type already exists, return it immediately.
            if let Some(inner) = read_lock.upgrade() {
                return Type { inner };
            }
        }

        let mut write_lock = self.inner.array_type.write();

        // Recheck if another thread created the type in the mean time
        if let Some(inner) = write_lock.upgrade() {
            return Type { inner };
        }

        let ty = Type::new_unlinked(
            format!("{}{ARRAY_SUFFIX}", self.name()),
            TypeData::Array(ArrayInfo {
                element: self.clone(),
            }),
        );
        *write_lock = Arc::downgrade(&ty.inner);

        ty
    }

    /// Initializes the type: super types first, then this type's initializer.
    ///
    /// Every initializer runs at most once. Callers on other threads block until it has finished,
    /// while a recursive call from the initializing thread itself returns immediately.
    pub fn initialize(&self) {
        if self.is_initialized() {
            return;
        }

        if let Some(super_type) = self.super_type() {
            super_type.initialize();
        }

        let running = self.inner.initializing.lock();
        if running.get() || self.is_initialized() {
            return;
        }

        running.set(true);
        let _running = ResetOnDrop(&running);
        if let Some(initializer) = &self.inner.initializer {
            log::debug!("initializing type `{}`", self.name());
            initializer(self);
        }
        self.inner.initialized.store(true, Ordering::Release);
    }

    /// Returns true if [`Type::initialize`] completed for this type.
    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.load(Ordering::Acquire)
    }
}

/// Clears the running flag of an initialization, also when the initializer panics.
struct ResetOnDrop<'a>(&'a Cell<bool>);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Debug for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self.name(), f)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

/// A helper struct to create a struct type.
pub struct StructTypeBuilder {
    /// The name of the struct type
    name: String,

    /// The type to derive from, the root type if not set
    super_type: Option<Type>,

    modifiers: Modifiers,

    fields: Vec<FieldInfo>,

    methods: Vec<MethodInfo>,

    initializer: Option<Initializer>,
}

impl StructTypeBuilder {
    /// Starts building a public struct type with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_type: None,
            modifiers: Modifiers::PUBLIC,
            fields: Vec::new(),
            methods: Vec::new(),
            initializer: None,
        }
    }

    /// Sets the type the struct derives from
    pub fn set_super_type(mut self, super_type: Type) -> Self {
        self.super_type = Some(super_type);
        self
    }

    /// Sets the modifiers of the struct
    pub fn set_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Adds a field to the struct
    pub fn add_field(mut self, name: impl Into<String>, ty: Type, modifiers: Modifiers) -> Self {
        self.fields.push(FieldInfo {
            name: name.into(),
            ty,
            modifiers,
        });
        self
    }

    /// Adds a collection of fields to the struct
    pub fn add_fields<N: Into<String>>(
        mut self,
        iter: impl IntoIterator<Item = (N, Type, Modifiers)>,
    ) -> Self {
        for (name, ty, modifiers) in iter {
            self = self.add_field(name, ty, modifiers);
        }
        self
    }

    /// Adds a method to the struct
    pub fn add_method(
        mut self,
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = Type>,
        return_type: Type,
        modifiers: Modifiers,
    ) -> Self {
        self.methods.push(MethodInfo {
            name: name.into(),
            parameters: parameters.into_iter().collect(),
            return_type,
            modifiers,
        });
        self
    }

    /// Sets a function that runs once, the first time the type is initialized.
    pub fn on_initialize(mut self, initializer: impl Fn(&Type) + Send + Sync + 'static) -> Self {
        self.initializer = Some(Box::new(initializer));
        self
    }

    /// Finishes building the struct returning the corresponding [`Type`].
    ///
    /// # Errors
    ///
    /// Returns [`ruyi_assert::Error::InvalidArgument`] if the name is blank or reserved for
    /// primitive and array types, if the super type is not a struct or is final, or if two
    /// fields share a name.
    pub fn finish(self) -> Result<Type> {
        let name = require_non_blank(self.name.as_str(), || {
            failed_msg("the name of a struct type must not be blank")
        })?;
        require_true(
            PrimitiveType::from_name(name).is_none() && !name.ends_with(ARRAY_SUFFIX),
            || failed_msg(format!("the name [{name}] is reserved")),
        )?;

        let super_type = self
            .super_type
            .unwrap_or_else(|| Type::object().clone());
        let extendable = super_type
            .as_struct()
            .is_some_and(|s| !s.is_final());
        require_true(extendable, || {
            failed_msg(format!(
                "type [{super_type}] cannot be extended by type [{}]",
                self.name
            ))
        })?;

        let mut field_names = HashSet::with_capacity(self.fields.len());
        if let Some(duplicate) = self
            .fields
            .iter()
            .find(|field| !field_names.insert(field.name.as_str()))
        {
            return Err(ruyi_assert::Error::invalid_argument(failed_msg(format!(
                "field [{}] is declared twice in type [{}]",
                duplicate.name, self.name
            ))));
        }

        Ok(Type::with_initializer(
            self.name,
            TypeData::Struct(StructInfo {
                super_type: Some(super_type),
                modifiers: self.modifiers,
                fields: self.fields,
                methods: self.methods,
            }),
            self.initializer,
        ))
    }
}

/// A trait that defines static type information for types that can provide it.
///
/// Implement it for your own types by building the descriptor once:
///
/// ```rust
/// # use once_cell::sync::OnceCell;
/// # use ruyi_reflect::{HasStaticType, Modifiers, StructTypeBuilder, Type};
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl HasStaticType for Point {
///     fn type_info() -> &'static Type {
///         static TYPE_INFO: OnceCell<Type> = OnceCell::new();
///         TYPE_INFO.get_or_init(|| {
///             StructTypeBuilder::new("geometry::Point")
///                 .add_field("x", i32::type_info().clone(), Modifiers::PUBLIC)
///                 .add_field("y", i32::type_info().clone(), Modifiers::PUBLIC)
///                 .finish()
///                 .expect("invalid point type")
///         })
///     }
/// }
///
/// assert_eq!(Point::type_info().name(), "geometry::Point");
/// ```
pub trait HasStaticType {
    /// Returns the descriptor of the type.
    fn type_info() -> &'static Type;
}

macro_rules! impl_primitive_type {
    ($($ty:ty => $primitive:ident),+ $(,)?) => {
        $(
            impl HasStaticType for $ty {
                fn type_info() -> &'static Type {
                    PrimitiveType::$primitive.type_info()
                }
            }
        )+
    }
}

impl_primitive_type!(
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    bool => Boolean,
    () => Void,
);

impl HasStaticType for String {
    fn type_info() -> &'static Type {
        Type::string()
    }
}

impl HasStaticType for str {
    fn type_info() -> &'static Type {
        Type::string()
    }
}

/// Every type that has static type information also has an array type
impl<T: HasStaticType + 'static> HasStaticType for Vec<T> {
    fn type_info() -> &'static Type {
        static VALUE: Lazy<StaticTypeMap<Type>> = Lazy::new(StaticTypeMap::default);
        VALUE.call_once::<T, _>(|| T::type_info().array_type())
    }
}

/// Every type that has static type information also has an array type
impl<T: HasStaticType + 'static> HasStaticType for Box<[T]> {
    fn type_info() -> &'static Type {
        Vec::<T>::type_info()
    }
}

#[cfg(test)]
mod tests {
    use super::{HasStaticType, PrimitiveType, StructTypeBuilder, Type};
    use crate::Modifiers;

    #[test]
    fn array_types_are_cached() {
        let int = i32::type_info();
        let first = int.array_type();
        let second = int.array_type();
        assert_eq!(first, second);
        assert_eq!(first.name(), "int[]");
        assert_eq!(first.element_type(), Some(int));
        assert_eq!(first.array_type().dimensions(), 2);
    }

    #[test]
    fn static_array_types() {
        assert_eq!(
            Vec::<i32>::type_info(),
            &PrimitiveType::Int.type_info().array_type()
        );
        assert_eq!(Vec::<Vec<i32>>::type_info().name(), "int[][]");
        assert_eq!(Box::<[String]>::type_info().name(), "core::String[]");
    }

    #[test]
    fn super_types() {
        assert_eq!(i32::type_info().super_type(), None);
        assert_eq!(Type::object().super_type(), None);
        assert_eq!(Type::string().super_type(), Some(Type::object()));
        assert_eq!(Vec::<i32>::type_info().super_type(), Some(Type::object()));
    }

    #[test]
    fn assignability() {
        let base = StructTypeBuilder::new("zoo::Animal").finish().unwrap();
        let derived = StructTypeBuilder::new("zoo::Cat")
            .set_super_type(base.clone())
            .finish()
            .unwrap();

        assert!(base.is_assignable_from(&derived));
        assert!(!derived.is_assignable_from(&base));
        assert!(Type::object().is_assignable_from(&derived));
        assert!(base.array_type().is_assignable_from(&derived.array_type()));
        assert!(!i64::type_info().is_assignable_from(i32::type_info()));
        assert!(!Type::object().is_assignable_from(i32::type_info()));
        assert!(!Type::object()
            .array_type()
            .is_assignable_from(&i32::type_info().array_type()));
    }

    #[test]
    fn packages() {
        assert_eq!(Type::string().package(), "core");
        assert_eq!(Vec::<String>::type_info().package(), "core");
        assert_eq!(i32::type_info().package(), "");
        let unscoped = StructTypeBuilder::new("Unscoped").finish().unwrap();
        assert_eq!(unscoped.package(), "");
    }

    #[test]
    fn invalid_builders() {
        assert!(StructTypeBuilder::new("  ").finish().is_err());
        assert!(StructTypeBuilder::new("int").finish().is_err());
        assert!(StructTypeBuilder::new("core::Integer").finish().is_err());
        assert!(StructTypeBuilder::new("Foo[]").finish().is_err());
        assert!(StructTypeBuilder::new("MyString")
            .set_super_type(Type::string().clone())
            .finish()
            .is_err());
        assert!(StructTypeBuilder::new("Duplicate")
            .add_field("a", i32::type_info().clone(), Modifiers::PUBLIC)
            .add_field("a", i64::type_info().clone(), Modifiers::PUBLIC)
            .finish()
            .is_err());
    }
}
