/// A curated pronunciation-and-gloss entry for a difficult term (1–4
/// characters) of the received text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlossEntry {
    pub term: &'static str,
    pub pinyin: &'static str,
    pub meaning: &'static str,
}

const fn entry(term: &'static str, pinyin: &'static str, meaning: &'static str) -> GlossEntry {
    GlossEntry {
        term,
        pinyin,
        meaning,
    }
}

/// Difficult terms of the received text with pronunciation and gloss.
///
/// The table deliberately contains overlapping keys (e.g. 谷神 and 谷 with
/// different glosses); the annotator resolves overlaps by longest match.
/// Extending coverage means editing this table.
pub const DIFFICULT_TERMS: &[GlossEntry] = &[
    entry("徼", "jiào", "边界，边际"),
    entry("牝", "pìn", "鸟兽的雌性，喻指柔弱"),
    entry("玄牝", "xuán pìn", "微妙而神秘的母体"),
    entry("谷神", "gǔ shén", "形容虚空而神奇的存在"),
    entry("冲", "chōng", "谦虚，冲和"),
    entry("渊", "yuān", "深沉，深潭"),
    entry("湛", "zhàn", "深沉，清澈"),
    entry("恍", "huǎng", "惚恍，不分明"),
    entry("惚", "hū", "惚恍，不分明"),
    entry("窈", "yǎo", "深远，不见踪影"),
    entry("冥", "míng", "幽暗，深不可测"),
    entry("橐龠", "tuó yuè", "风箱，比喻虚空而能生风"),
    entry("刍狗", "chú gǒu", "用草扎的狗，用于祭祀"),
    entry("歙", "xī", "收缩，收敛"),
    entry("张", "zhāng", "扩张，张开"),
    entry("羸", "léi", "瘦弱，衰败"),
    entry("赘", "zhuì", "多余，累赘"),
    entry("沌", "dùn", "混沌兮，不分明的样子"),
    entry("澹", "dàn", "恬静，安定"),
    entry("飂", "liù", "风声，飘扬"),
    entry("豫", "yù", "犹豫。容：犹豫，谨慎。"),
    entry("犹", "yóu", "犹豫，警惕"),
    entry("俨", "yǎn", "恭敬，庄重"),
    entry("涣", "huàn", "消散，离散"),
    entry("敦", "dūn", "淳厚，诚恳"),
    entry("旷", "kuàng", "空阔，广大"),
    entry("混", "hùn", "混同，混浊"),
    entry("浊", "zhuó", "浑浊"),
    entry("儽", "lěi", "颓丧，疲惫"),
    entry("孔德", "kǒng dé", "大德，孔指甚、大"),
    entry("跂", "qì", "踮起脚尖"),
    entry("跨", "kuà", "迈大步"),
    entry("瑕谪", "xiá zhé", "过失，缺点"),
    entry("筹策", "chóu cè", "计数的筹码"),
    entry("楗", "jiàn", "门栓"),
    entry("袭明", "xí míng", "承袭光明的智慧"),
    entry("雄", "xióng", "雄性，刚强"),
    entry("雌", "cí", "鸟兽的雌性，柔弱"),
    entry("溪", "xī", "溪涧"),
    entry("式", "shì", "范式，法式"),
    entry("忒", "tè", "差错"),
    entry("谷", "gǔ", "川谷，虚怀"),
    entry("朴", "pǔ", "朴素，未雕琢的木材"),
    entry("器", "qì", "器具"),
    entry("嚣", "xiāo", "喧嚣，吵闹"),
    entry("垓", "gāi", "极远处，八荒之外"),
];
