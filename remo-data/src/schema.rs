use serde_json::Value;

/// Closed enumeration of field kinds a data-model schema can declare.
///
/// Data-layer adapters translate their backend's type representation into
/// this enumeration at the boundary; anything they cannot express becomes
/// [`FieldKind::Unsupported`], which downstream consumers skip.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Date,
    Buffer,
    Decimal128,
    ObjectId,
    /// Schemaless value.
    Mixed,
    /// Homogeneous array of the given element kind (nests for arrays of
    /// arrays).
    Array(Box<FieldKind>),
    /// Embedded sub-document with its own schema.
    Embedded(ModelSchema),
    /// Array of embedded sub-documents.
    DocumentArray(ModelSchema),
    /// A backend type the adapter could not translate.
    Unsupported,
}

/// One declared field: its kind plus the metadata that travels with it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub required: bool,
    pub enum_values: Option<Vec<Value>>,
}

impl FieldSpec {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            enum_values: None,
        }
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    pub fn date() -> Self {
        Self::new(FieldKind::Date)
    }

    pub fn buffer() -> Self {
        Self::new(FieldKind::Buffer)
    }

    pub fn decimal() -> Self {
        Self::new(FieldKind::Decimal128)
    }

    pub fn object_id() -> Self {
        Self::new(FieldKind::ObjectId)
    }

    pub fn mixed() -> Self {
        Self::new(FieldKind::Mixed)
    }

    pub fn array(element: FieldKind) -> Self {
        Self::new(FieldKind::Array(Box::new(element)))
    }

    pub fn embedded(schema: ModelSchema) -> Self {
        Self::new(FieldKind::Embedded(schema))
    }

    pub fn document_array(schema: ModelSchema) -> Self {
        Self::new(FieldKind::DocumentArray(schema))
    }

    pub fn unsupported() -> Self {
        Self::new(FieldKind::Unsupported)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn enum_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// An ordered data-model schema: field declaration order is meaningful and
/// preserved all the way into the generated documentation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSchema {
    fields: Vec<(String, FieldSpec)>,
}

impl ModelSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Redeclaring a name replaces the earlier spec in
    /// place, keeping its position.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.insert(name.into(), spec);
        self
    }

    pub(crate) fn insert(&mut self, name: String, spec: FieldSpec) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = spec,
            None => self.fields.push((name, spec)),
        }
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of required fields, in declaration order, not deduplicated.
    pub fn required_paths(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(_, spec)| spec.required)
            .map(|(name, _)| name.clone())
            .collect()
    }
}
