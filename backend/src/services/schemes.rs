//! Government scheme catalogue
//!
//! Static, localized list of central agriculture schemes.

use shared::{GovernmentScheme, Language};

use crate::error::{AppError, AppResult};

/// Clients may cache the catalogue for a day
pub const SCHEMES_CACHE_CONTROL: &str = "public, max-age=86400";

const fn scheme(
    name: &'static str,
    description: &'static str,
    eligibility: &'static str,
    benefits: &'static str,
    apply_link: &'static str,
) -> GovernmentScheme {
    GovernmentScheme {
        name,
        description,
        eligibility,
        benefits,
        apply_link,
    }
}

/// Schemes for a language
pub fn schemes_for(language: Language) -> &'static [GovernmentScheme] {
    match language {
        Language::English => &ENGLISH,
        Language::Hindi => &HINDI,
        Language::Bengali => &BENGALI,
    }
}

/// Resolve the `language` query parameter; only exact codes are accepted
pub fn parse_language(code: Option<&str>) -> AppResult<Language> {
    code.and_then(|c| Language::ALL.into_iter().find(|l| l.code() == c))
        .ok_or_else(|| {
            AppError::Validation("Unsupported language. Use ?language=en|hi|bn".to_string())
        })
}

const ENGLISH: [GovernmentScheme; 10] = [
    scheme(
        "Pradhan Mantri Kisan Samman Nidhi (PM-KISAN)",
        "A scheme providing income support of ₹6,000 per year to all farmer families.",
        "Small & marginal farmers",
        "₹6,000 per year in three installments",
        "https://pmkisan.gov.in/",
    ),
    scheme(
        "PM Fasal Bima Yojana (PMFBY)",
        "Crop insurance scheme to provide financial support in case of crop loss due to natural calamities.",
        "All farmers growing notified crops",
        "Insurance coverage for crop loss",
        "https://pmfby.gov.in/",
    ),
    scheme(
        "Soil Health Card Scheme",
        "Provides soil health reports to farmers and recommends suitable fertilizers.",
        "All farmers",
        "Improved soil fertility and better crop yield",
        "https://www.soilhealth.dac.gov.in/",
    ),
    scheme(
        "Rashtriya Krishi Vikas Yojana (RKVY)",
        "Promotes agricultural growth through financial assistance to states.",
        "State governments and farmers",
        "Funding for agricultural projects",
        "https://rkvy.nic.in/",
    ),
    scheme(
        "National Agriculture Market (e-NAM)",
        "An online trading platform for agricultural commodities to help farmers get better prices.",
        "Registered farmers & traders",
        "Transparent pricing and better market access",
        "https://enam.gov.in/",
    ),
    scheme(
        "Kisan Credit Card (KCC)",
        "Provides short-term credit to farmers for crop cultivation expenses.",
        "All farmers, including tenant farmers",
        "Low-interest loans for agricultural needs",
        "https://pmkisan.gov.in/KisanCreditCard.aspx",
    ),
    scheme(
        "Paramparagat Krishi Vikas Yojana (PKVY)",
        "Promotes organic farming through cluster-based development.",
        "Farmers in clusters of 50 acres",
        "Financial assistance for organic farming",
        "https://pgsindia-ncof.gov.in/",
    ),
    scheme(
        "Pradhan Mantri Krishi Sinchayee Yojana (PMKSY)",
        "Ensures irrigation efficiency and water conservation.",
        "Farmers and irrigation departments",
        "Funding for water-saving irrigation projects",
        "https://pmksy.gov.in/",
    ),
    scheme(
        "Gramin Bhandaran Yojana",
        "Encourages construction of rural godowns for better storage of farm produce.",
        "Farmers, entrepreneurs, and NGOs",
        "50% subsidy on storage infrastructure",
        "https://agriinfra.dac.gov.in/",
    ),
    scheme(
        "Agricultural Technology Management Agency (ATMA)",
        "Strengthens agricultural extension services at the district level.",
        "Farmers and extension workers",
        "Training and funding for technology adoption",
        "https://atmaaims.com/",
    ),
];

const HINDI: [GovernmentScheme; 10] = [
    scheme(
        "प्रधानमंत्री किसान सम्मान निधि (PM-KISAN)",
        "₹6,000 प्रति वर्ष की आय सहायता सभी किसान परिवारों को प्रदान करने की योजना।",
        "छोटे और सीमांत किसान",
        "₹6,000 प्रति वर्ष, तीन किस्तों में",
        "https://pmkisan.gov.in/",
    ),
    scheme(
        "प्रधानमंत्री फसल बीमा योजना (PMFBY)",
        "प्राकृतिक आपदाओं से फसल नुकसान की स्थिति में किसानों को वित्तीय सहायता प्रदान करने वाली बीमा योजना।",
        "सभी अधिसूचित फसल उगाने वाले किसान",
        "फसल नुकसान के लिए बीमा कवरेज",
        "https://pmfby.gov.in/",
    ),
    scheme(
        "मृदा स्वास्थ्य कार्ड योजना",
        "किसानों को मृदा स्वास्थ्य रिपोर्ट प्रदान करने और उपयुक्त उर्वरकों की सिफारिश करने की योजना।",
        "सभी किसान",
        "बेहतर मृदा उर्वरता और बेहतर फसल उत्पादन",
        "https://www.soilhealth.dac.gov.in/",
    ),
    scheme(
        "राष्ट्रीय कृषि विकास योजना (RKVY)",
        "राज्यों को वित्तीय सहायता प्रदान कर कृषि विकास को बढ़ावा देने वाली योजना।",
        "राज्य सरकारें और किसान",
        "कृषि विकास परियोजनाओं के लिए वित्तीय सहायता",
        "https://rkvy.nic.in/",
    ),
    scheme(
        "राष्ट्रीय कृषि बाजार (e-NAM)",
        "किसानों को बेहतर मूल्य दिलाने के लिए कृषि उत्पादों का एक ऑनलाइन व्यापार मंच।",
        "पंजीकृत किसान और व्यापारी",
        "पारदर्शी मूल्य निर्धारण और बेहतर बाजार पहुंच",
        "https://enam.gov.in/",
    ),
    scheme(
        "किसान क्रेडिट कार्ड (KCC)",
        "फसल उगाने के खर्चों के लिए किसानों को अल्पकालिक ऋण प्रदान करता है।",
        "सभी किसान, किरायेदार किसान भी",
        "कृषि आवश्यकताओं के लिए कम ब्याज दर पर ऋण",
        "https://pmkisan.gov.in/KisanCreditCard.aspx",
    ),
    scheme(
        "परंपरागत कृषि विकास योजना (PKVY)",
        "जैविक खेती को बढ़ावा देने के लिए क्लस्टर आधारित विकास।",
        "50 एकड़ के समूहों में किसान",
        "जैविक खेती के लिए वित्तीय सहायता",
        "https://pgsindia-ncof.gov.in/",
    ),
    scheme(
        "प्रधानमंत्री कृषि सिंचाई योजना (PMKSY)",
        "सिंचाई दक्षता में सुधार और जल संरक्षण सुनिश्चित करने के लिए योजना।",
        "किसान और सिंचाई विभाग",
        "जल संरक्षण परियोजनाओं के लिए धन",
        "https://pmksy.gov.in/",
    ),
    scheme(
        "ग्रामीण भंडारण योजना",
        "किसानों को बेहतर भंडारण के लिए ग्रामीण गोदाम बनाने के लिए प्रोत्साहित करता है।",
        "किसान, उद्यमी और एनजीओ",
        "भंडारण संरचना पर 50% सब्सिडी",
        "https://agriinfra.dac.gov.in/",
    ),
    scheme(
        "कृषि प्रौद्योगिकी प्रबंधन एजेंसी (ATMA)",
        "जिला स्तर पर कृषि विस्तार सेवाओं को मजबूत करता है।",
        "किसान और कृषि अधिकारी",
        "प्रशिक्षण और तकनीकी अनुदान",
        "https://atmaaims.com/",
    ),
];

const BENGALI: [GovernmentScheme; 10] = [
    scheme(
        "প্রধানমন্ত্রী কিষান সম্মান নিধি (PM-KISAN)",
        "₹6,000 আয় সহায়তা প্রদান করার জন্য একটি কেন্দ্রীয় প্রকল্প।",
        "ছোট ও প্রান্তিক কৃষক",
        "₹6,000 প্রতি বছর, তিনটি কিস্তিতে প্রদান করা হয়",
        "https://pmkisan.gov.in/",
    ),
    scheme(
        "প্রধানমন্ত্রী ফসল বীমা যোজনা (PMFBY)",
        "প্রাকৃতিক দুর্যোগের কারণে ফসল ক্ষতির ক্ষেত্রে কৃষকদের আর্থিক সহায়তা প্রদানের জন্য ফসল বীমা প্রকল্প।",
        "সমস্ত বিজ্ঞপ্তিযুক্ত ফসল চাষী",
        "ফসল ক্ষতির জন্য বীমা কভারেজ",
        "https://pmfby.gov.in/",
    ),
    scheme(
        "মাটি স্বাস্থ্য কার্ড প্রকল্প",
        "কৃষকদের মাটির স্বাস্থ্য প্রতিবেদন সরবরাহ করতে এবং উপযুক্ত সার সুপারিশ করতে সরকারী উদ্যোগ।",
        "সমস্ত কৃষক",
        "উন্নত মাটির উর্বরতা এবং উন্নত ফসল ফলন",
        "https://www.soilhealth.dac.gov.in/",
    ),
    scheme(
        "জাতীয় কৃষি উন্নয়ন যোজনা (RKVY)",
        "রাজ্য সরকার এবং কৃষকদের কৃষি বৃদ্ধির জন্য আর্থিক সহায়তা প্রদান করে।",
        "রাজ্য সরকার ও কৃষক",
        "কৃষি উন্নয়ন প্রকল্পের জন্য অর্থায়ন",
        "https://rkvy.nic.in/",
    ),
    scheme(
        "জাতীয় কৃষি বাজার (e-NAM)",
        "কৃষকদের ভালো দাম পেতে সাহায্য করার জন্য কৃষি পণ্যের অনলাইন ট্রেডিং প্ল্যাটফর্ম।",
        "নিবন্ধিত কৃষক ও ব্যবসায়ী",
        "স্বচ্ছ মূল্য নির্ধারণ এবং উন্নত বাজার সংযোগ",
        "https://enam.gov.in/",
    ),
    scheme(
        "কিষান ক্রেডিট কার্ড (KCC)",
        "চাষাবাদের খরচের জন্য কৃষকদের স্বল্পমেয়াদী ঋণ প্রদান করে।",
        "সমস্ত কৃষক, ভাড়াটিয়া কৃষকও অন্তর্ভুক্ত",
        "কৃষি চাহিদার জন্য কম সুদের ঋণ",
        "https://pmkisan.gov.in/KisanCreditCard.aspx",
    ),
    scheme(
        "পরম্পরাগত কৃষি বিকাশ যোজনা (PKVY)",
        "জৈব চাষের প্রচারের জন্য ক্লাস্টার ভিত্তিক উন্নয়ন।",
        "৫০ একর জমির কৃষক",
        "জৈব চাষের জন্য আর্থিক সহায়তা",
        "https://pgsindia-ncof.gov.in/",
    ),
    scheme(
        "প্রধানমন্ত্রী কৃষি সিঞ্চাই যোজনা (PMKSY)",
        "সেচের দক্ষতা উন্নত করা এবং জল সংরক্ষণ নিশ্চিত করার জন্য একটি প্রকল্প।",
        "কৃষক এবং সেচ বিভাগ",
        "জল সংরক্ষণ প্রকল্পের জন্য অর্থায়ন",
        "https://pmksy.gov.in/",
    ),
    scheme(
        "গ্রামীণ ভান্ডারণ যোজনা",
        "চাষিদের ফসল সংরক্ষণের জন্য উন্নত গুদাম নির্মাণে উৎসাহিত করার প্রকল্প।",
        "কৃষক, উদ্যোক্তা এবং এনজিও",
        "সংরক্ষণ পরিকাঠামোর জন্য ৫০% ভর্তুকি",
        "https://agriinfra.dac.gov.in/",
    ),
    scheme(
        "কৃষি প্রযুক্তি ব্যবস্থাপনা সংস্থা (ATMA)",
        "জেলা স্তরের কৃষি সম্প্রসারণ পরিষেবা উন্নত করার প্রকল্প।",
        "কৃষক এবং সম্প্রসারণ কর্মী",
        "প্রশিক্ষণ এবং প্রযুক্তি গ্রহণের জন্য অর্থায়ন",
        "https://atmaaims.com/",
    ),
];
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_ten_schemes() {
        for language in Language::ALL {
            let schemes = schemes_for(language);
            assert_eq!(schemes.len(), 10);
            assert!(schemes.iter().all(|s| s.apply_link.starts_with("https://")));
        }
    }

    #[test]
    fn test_links_align_across_languages() {
        let en: Vec<_> = schemes_for(Language::English).iter().map(|s| s.apply_link).collect();
        let hi: Vec<_> = schemes_for(Language::Hindi).iter().map(|s| s.apply_link).collect();
        let bn: Vec<_> = schemes_for(Language::Bengali).iter().map(|s| s.apply_link).collect();
        assert_eq!(en, hi);
        assert_eq!(en, bn);
    }

    #[test]
    fn test_parse_language() {
        assert_eq!(parse_language(Some("hi")).unwrap(), Language::Hindi);
        assert_eq!(parse_language(Some("bn")).unwrap(), Language::Bengali);
        assert!(parse_language(Some("fr")).is_err());
        assert!(parse_language(Some("EN")).is_err());
        assert!(parse_language(None).is_err());
    }
}
