//! `tf.train.Example` messages.
//!
//! Field tags and list encodings match TensorFlow's `example.proto` and
//! `feature.proto`, so values can be exchanged with TensorFlow as protobuf
//! bytes through [`prost::Message`]. The feature map is key-ordered.

use std::collections::BTreeMap;

use crate::schema::FeatureType;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BytesList {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub value: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FloatList {
    #[prost(float, repeated, tag = "1")]
    pub value: Vec<f32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Int64List {
    #[prost(int64, repeated, tag = "1")]
    pub value: Vec<i64>,
}

/// A single typed value list. `kind == None` means "present without values".
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Feature {
    #[prost(oneof = "feature::Kind", tags = "1, 2, 3")]
    pub kind: Option<feature::Kind>,
}

pub mod feature {
    use crate::schema::FeatureType;

    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "1")]
        BytesList(super::BytesList),
        #[prost(message, tag = "2")]
        FloatList(super::FloatList),
        #[prost(message, tag = "3")]
        Int64List(super::Int64List),
    }

    impl Kind {
        pub fn feature_type(&self) -> FeatureType {
            match self {
                Kind::BytesList(_) => FeatureType::Bytes,
                Kind::FloatList(_) => FeatureType::Float,
                Kind::Int64List(_) => FeatureType::Int64,
            }
        }

        pub fn len(&self) -> usize {
            match self {
                Kind::BytesList(list) => list.value.len(),
                Kind::FloatList(list) => list.value.len(),
                Kind::Int64List(list) => list.value.len(),
            }
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Features {
    #[prost(btree_map = "string, message", tag = "1")]
    pub feature: BTreeMap<String, Feature>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Example {
    #[prost(message, optional, tag = "1")]
    pub features: Option<Features>,
}

impl Feature {
    pub fn int64(values: impl Into<Vec<i64>>) -> Self {
        Self {
            kind: Some(feature::Kind::Int64List(Int64List {
                value: values.into(),
            })),
        }
    }

    pub fn float(values: impl Into<Vec<f32>>) -> Self {
        Self {
            kind: Some(feature::Kind::FloatList(FloatList {
                value: values.into(),
            })),
        }
    }

    pub fn bytes<I, B>(values: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        Self {
            kind: Some(feature::Kind::BytesList(BytesList {
                value: values.into_iter().map(Into::into).collect(),
            })),
        }
    }

    /// `None` when no list is set.
    pub fn feature_type(&self) -> Option<FeatureType> {
        self.kind.as_ref().map(feature::Kind::feature_type)
    }

    pub fn len(&self) -> usize {
        self.kind.as_ref().map_or(0, feature::Kind::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_int64(&self) -> Option<&[i64]> {
        match &self.kind {
            Some(feature::Kind::Int64List(list)) => Some(&list.value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<&[f32]> {
        match &self.kind {
            Some(feature::Kind::FloatList(list)) => Some(&list.value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[Vec<u8>]> {
        match &self.kind {
            Some(feature::Kind::BytesList(list)) => Some(&list.value),
            _ => None,
        }
    }
}

impl Example {
    pub fn from_features<I, K>(features: I) -> Self
    where
        I: IntoIterator<Item = (K, Feature)>,
        K: Into<String>,
    {
        let feature = features
            .into_iter()
            .map(|(name, f)| (name.into(), f))
            .collect();
        Self {
            features: Some(Features { feature }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Feature> {
        self.features.as_ref()?.feature.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, feature: Feature) -> Option<Feature> {
        self.features
            .get_or_insert_with(Features::default)
            .feature
            .insert(name.into(), feature)
    }

    /// Iterate features in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Feature)> {
        self.features
            .iter()
            .flat_map(|f| f.feature.iter())
            .map(|(name, feature)| (name.as_str(), feature))
    }

    pub fn len(&self) -> usize {
        self.features.as_ref().map_or(0, |f| f.feature.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Into<String>> FromIterator<(K, Feature)> for Example {
    fn from_iter<I: IntoIterator<Item = (K, Feature)>>(iter: I) -> Self {
        Self::from_features(iter)
    }
}
