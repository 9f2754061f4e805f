//! Voice/chat assistant models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    /// Assistant reply as stored by the frontend
    Ai,
    Assistant,
    System,
    #[serde(other)]
    Unknown,
}

/// One turn of a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    #[serde(default)]
    pub text: String,
}

impl ChatMessage {
    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Ai,
            text: text.into(),
        }
    }
}

/// Assistant reply returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub conversation: Vec<ChatMessage>,
    pub timestamp: DateTime<Utc>,
    pub powered_by: String,
}

/// Which canned reply to send when the language model is unavailable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTopic {
    Weather,
    Crop,
    Disease,
    General,
}

impl FallbackTopic {
    /// Pick a topic from keywords in English, Hindi or Bengali
    pub fn detect(query: &str) -> Self {
        let q = query.to_lowercase();
        let has_any = |words: &[&str]| words.iter().any(|w| q.contains(w));
        if has_any(&["weather", "मौसम", "আবহাওয়া"]) {
            FallbackTopic::Weather
        } else if has_any(&["crop", "फसल", "ফসল"]) {
            FallbackTopic::Crop
        } else if has_any(&["disease", "बीमारी", "রোগ"]) {
            FallbackTopic::Disease
        } else {
            FallbackTopic::General
        }
    }

    /// Canned reply in the requested language
    pub fn reply(&self, language: Language) -> &'static str {
        match (self, language) {
            (FallbackTopic::Weather, Language::English) => {
                "Check your local weather service. Protect crops before rainfall."
            }
            (FallbackTopic::Weather, Language::Hindi) => {
                "मौसम की जानकारी के लिए स्थानीय मौसम विभाग से संपर्क करें। बारिश से पहले फसल को सुरक्षा दें।"
            }
            (FallbackTopic::Weather, Language::Bengali) => {
                "স্থানীয় আবহাওয়া দপ্তর থেকে তথ্য নিন। বৃষ্টির আগে ফসলে সুরক্ষা দিন।"
            }
            (FallbackTopic::Crop, Language::English) => {
                "Choose crops based on soil, weather, and market demand. Consider irrigation and input costs."
            }
            (FallbackTopic::Crop, Language::Hindi) => {
                "फसल चुनते समय मिट्टी, मौसम और बाजार की मांग देखें। सिंचाई और लागत भी ध्यान रखें।"
            }
            (FallbackTopic::Crop, Language::Bengali) => {
                "মাটি, আবহাওয়া ও বাজার চাহিদা অনুযায়ী ফসল বাছুন। সেচ ও খরচ বিবেচনা করুন।"
            }
            (FallbackTopic::Disease, Language::English) => {
                "If disease symptoms appear, consult the local agriculture officer with clear leaf photos."
            }
            (FallbackTopic::Disease, Language::Hindi) => {
                "रोग दिखने पर पत्तियों की फोटो लेकर कृषि अधिकारी/कृषि विज्ञान केंद्र से सलाह लें।"
            }
            (FallbackTopic::Disease, Language::Bengali) => {
                "রোগের লক্ষণ দেখা দিলে পরিষ্কার পাতার ছবি নিয়ে কৃষি কর্মকর্তার পরামর্শ নিন।"
            }
            (FallbackTopic::General, Language::English) => {
                "I’m here to help with your farming needs. Ask about crops, weather, or fertilizers."
            }
            (FallbackTopic::General, Language::Hindi) => {
                "मैं आपकी खेती में मदद करने के लिए यहाँ हूँ। फसल, मौसम या उर्वरक के बारे में पूछें।"
            }
            (FallbackTopic::General, Language::Bengali) => {
                "আমি আপনার কৃষিকাজে সাহায্য করার জন্য এখানে আছি। ফসল, আবহাওয়া বা সার সম্পর্কে জিজ্ঞাসা করুন।"
            }
        }
    }
}

/// Localized client-facing error replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidFormat,
    NoMessage,
    ServerError,
}

impl ChatErrorKind {
    pub fn reply(&self, language: Language) -> &'static str {
        match (self, language) {
            (ChatErrorKind::InvalidFormat, Language::English) => "I could not understand your question.",
            (ChatErrorKind::InvalidFormat, Language::Hindi) => "मुझे आपका सवाल समझ नहीं आया।",
            (ChatErrorKind::InvalidFormat, Language::Bengali) => "আমি আপনার প্রশ্ন বুঝতে পারিনি।",
            (ChatErrorKind::NoMessage, Language::English) => "No message received.",
            (ChatErrorKind::NoMessage, Language::Hindi) => "कोई संदेश नहीं मिला।",
            (ChatErrorKind::NoMessage, Language::Bengali) => "কোনো বার্তা পাওয়া যায়নি।",
            (ChatErrorKind::ServerError, Language::English) => {
                "There is a server issue. Please try again later."
            }
            (ChatErrorKind::ServerError, Language::Hindi) => {
                "सर्वर में समस्या है। कृपया थोड़ी देर बाद फिर कोशिश करें।"
            }
            (ChatErrorKind::ServerError, Language::Bengali) => {
                "সার্ভারে সমস্যা রয়েছে। পরে আবার চেষ্টা করুন।"
            }
        }
    }
}

/// System prompt for the agriculture assistant
pub fn agriculture_system_prompt(language: Language) -> &'static str {
    match language {
        Language::English => {
            "You are an expert agricultural assistant.\n\
             - Provide practical, actionable advice\n\
             - Focus on Indian agricultural practices when relevant\n\
             - Use simple, clear language\n\
             - Include weather/market info if helpful\n\
             - Keep answers concise (2–3 sentences)"
        }
        Language::Hindi => {
            "आप एक विशेषज्ञ कृषि सहायक हैं।\n\
             - व्यावहारिक सलाह दें\n\
             - भारतीय कृषि प्रथाओं पर ध्यान दें\n\
             - सरल भाषा का उपयोग करें\n\
             - यदि संभव हो तो मौसम/बाजार की जानकारी शामिल करें\n\
             - उत्तर संक्षिप्त रखें (2–3 वाक्य)"
        }
        Language::Bengali => {
            "আপনি একজন বিশেষজ্ঞ কৃষি সহায়ক।\n\
             - ব্যবহারিক পরামর্শ দিন\n\
             - প্রয়োজন অনুযায়ী ভারতীয় কৃষি প্রথার উপর জোর দিন\n\
             - সহজ ভাষা ব্যবহার করুন\n\
             - সম্ভব হলে আবহাওয়া/বাজার তথ্য যোগ করুন\n\
             - উত্তর সংক্ষিপ্ত রাখুন (২–৩টি বাক্য)"
        }
    }
}
