use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Poll {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub question: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub pub_date: DateTime<Utc>,
}

impl Poll {
    pub fn new(question: impl Into<String>, pub_date: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            question: question.into(),
            pub_date,
        }
    }
}

/// One answer to a [`Poll`]. `votes` only ever moves up, one accepted vote at a time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Choice {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub poll_id: ObjectId,
    pub choice_text: String,
    pub votes: i64,
}

impl Choice {
    pub fn new(poll_id: ObjectId, choice_text: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            poll_id,
            choice_text: choice_text.into(),
            votes: 0,
        }
    }
}
