//! Fixed value pools the generators sample from.

use crate::answers::QuestionPool;

pub(crate) const YES_NO: &[&str] = &["はい", "いいえ"];
const YES_NO_UNSURE: &[&str] = &["はい", "いいえ", "どちらとも言えない"];

const QUESTIONS: &[&str] = &[
    "Q1. 製品の利用頻度を教えてください。",
    "Q2. 製品の利用頻度は適切だと思いますか？",
    "Q3. 製品の利用頻度に関する課題はありますか？",
    "Q4. 製品の利用頻度に関する改善点があれば教えてください。",
    "Q5. 製品の利用頻度に関する全体的な満足度を教えてください。",
    "Q6. 製品の利用頻度に関するアイデアは豊富ですか？",
    "Q7. 製品の利用頻度に関する実現可能性は高いですか？",
    "Q8. 製品の利用頻度に関する独自性は高いですか？",
    "Q9. 製品の利用頻度に関するターゲット層は明確ですか？",
    "Q10. 製品の利用頻度に関する予算は適切ですか？",
    "Q11. 製品の利用頻度に関するスケジュールは適切ですか？",
    "Q12. 製品の利用頻度に関するプロモーション戦略は適切ですか？",
    "Q13. 製品の利用頻度に関する成功指標は明確ですか？",
    "Q14. 製品の利用頻度に関するリスク管理は適切ですか？",
    "Q15. 製品の利用頻度に関する継続性は高いですか？",
    "Q16. 製品の利用頻度に関する活用度は高いですか？",
    "Q17. 製品の利用頻度に関する専門性は高いですか？",
    "Q18. 製品の利用頻度に関する多様性は高いですか？",
    "Q19. 製品の利用頻度に関する柔軟性は高いですか？",
];

/// Answer options keyed by the question's "Qn" prefix.
fn answer_options(key: &str) -> &'static [&'static str] {
    match key {
        "Q1" => &["毎日", "週に数回", "月に数回", "めったに使わない", "ほとんど使わない"],
        "Q2" => YES_NO,
        "Q3" => &["特になし", "機能不足", "使いにくい", "価格が高い", "サポートが悪い"],
        "Q4" => &["特になし", "機能の追加", "UIの改善", "価格の引き下げ"],
        "Q5" => &["非常に満足", "満足", "普通", "不満", "非常に不満"],
        "Q6" | "Q7" | "Q8" | "Q9" | "Q10" | "Q11" | "Q12" | "Q13" | "Q14" | "Q15" | "Q16"
        | "Q17" | "Q18" | "Q19" => YES_NO_UNSURE,
        _ => YES_NO,
    }
}

/// The 19-question product survey the demo answer files are generated against.
pub fn default_question_bank() -> Vec<QuestionPool> {
    QUESTIONS
        .iter()
        .map(|&text| {
            let key = text.split('.').next().unwrap_or(text);
            QuestionPool::new(text, answer_options(key).iter().copied())
        })
        .collect()
}

// ── Respondent / business card pools ──

pub(crate) const CARD_LAST_NAMES: &[&str] = &[
    "佐藤", "鈴木", "高橋", "田中", "伊藤", "渡辺", "山本", "中村", "小林", "加藤", "吉田", "山田",
    "佐々木", "山口", "松本",
];

pub(crate) const CARD_FIRST_NAMES: &[&str] = &[
    "太郎", "一郎", "二郎", "花子", "優子", "健太", "美咲", "大輔", "陽子", "拓也", "直人", "由美",
    "翔太", "七海", "雄大",
];

pub(crate) const COMPANY_NAMES: &[&str] = &[
    "株式会社テック",
    "山田商事",
    "日本ソリューションズ",
    "グローバル貿易",
    "未来工業",
    "イノベーションラボ",
    "サミットホールディングス",
    "青空建設",
    "デジタルアーツ",
    "サイバーシステムズ",
];

pub(crate) const DEPARTMENTS: &[&str] = &[
    "営業部",
    "開発部",
    "総務部",
    "人事部",
    "マーケティング部",
    "広報部",
    "経営企画室",
];

pub(crate) const POSITIONS: &[&str] = &["部長", "課長", "係長", "主任", "一般", "マネージャー", "リーダー"];

pub(crate) const EMAIL_USERS: &[&str] = &["user", "contact", "info"];

// ── Operator pools ──

pub(crate) const OPERATOR_LAST_NAMES: &[&str] = &[
    "田中", "伊藤", "渡辺", "山本", "中村", "小林", "加藤", "吉田", "山田", "佐々木", "山口", "松本",
    "井上", "木村", "林", "斎藤", "清水", "山崎", "森", "阿部", "池田", "橋本", "山下", "石川",
    "中島", "前田", "藤田", "小川", "後藤", "岡田", "長谷川", "村上", "近藤", "石井",
];

pub(crate) const OPERATOR_FIRST_NAMES: &[&str] = &[
    "太郎", "次郎", "花子", "一郎", "恵", "真一", "愛", "大輔", "美咲", "翔太", "陽菜", "健", "直人",
    "彩", "拓哉", "未来", "亮", "優子", "直樹", "遥", "健一", "七海", "剛", "美月", "達也", "香織",
    "哲也", "美穂", "秀樹", "智子",
];

pub(crate) const OPERATOR_GROUPS: &[&str] = &["展示会Aチーム", "セミナーBチーム", "その他案件Cチーム"];

// ── Image pools ──

pub(crate) const CARD_COMPANIES: &[&str] = &[
    "株式会社 スピード調査",
    "SPEED AD Co., Ltd.",
    "火災安全コンサルティング",
    "都市防災ソリューション",
];

pub(crate) const CARD_NAMES: &[&str] = &["山田 太郎", "佐藤 次郎", "鈴木 一郎", "田中 花子", "伊藤 博"];

pub(crate) const CARD_TITLES: &[&str] = &["代表取締役", "調査技師", "チーフマネージャー", "主任調査員"];

pub(crate) const HANDWRITING_NOTES: &[&str] = &[
    "現場確認済み",
    "出火原因調査中",
    "異常なし",
    "2026/02/07 調査員",
    "Point A: 焦げ跡あり",
    "コンセント付近を確認",
];
