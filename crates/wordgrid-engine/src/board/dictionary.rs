//! Word lists boards are drawn from.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use wordgrid_core::config::GameConfig;
use wordgrid_core::error::{AppError, ErrorKind};
use wordgrid_core::result::AppResult;

/// Built-in word list (Russian nouns).
#[rustfmt::skip]
const BUILTIN_WORDS: &[&str] = &[
    "автомат", "агент", "адвокат", "акт", "актёр", "акция", "альбом", "Америка", "амфибия",
    "ангел", "Англия", "аппарат", "арена", "атлас", "атлет", "Африка", "бабочка", "багет",
    "база", "баланс", "банк", "банка", "баня", "бар", "барак", "барьер", "бассейн",
    "батарея", "Бах", "башня", "белки", "белый", "берёза", "Берлин", "билет", "биржа",
    "битва", "блин", "блок", "боб", "боевик", "бокс", "болезнь", "больница", "бомба",
    "боров", "бор", "борт", "ботинок", "бочка", "брак", "бревно", "бубны", "бумага",
    "бутылка", "бычок", "бюст", "вагон", "вал", "ведьма", "век", "великан", "венец", "вера",
    "вертолёт", "верфь", "вес", "весна", "ветер", "вечер", "взгляд", "вид", "вилка",
    "вирус", "виски", "вода", "водолаз", "вождь", "воздух", "война", "волна", "воля", "вор",
    "ворот", "ворота", "врач", "время", "выпечка", "высота", "выступление", "гавань", "газ",
    "газель", "галоп", "гвоздь", "гений", "герб", "Германия", "герой", "гигант", "глаз",
    "Голливуд", "голова", "голос", "голубь", "гольф", "гора", "горло", "горн", "город",
    "Горький", "град", "гранат", "гранит", "гребень", "Греция", "гриф", "группа", "груша",
    "губа", "губка", "гусеница", "дама", "дача", "двор", "дворник", "день", "дерево",
    "десна", "динозавр", "диск", "дождь", "доза", "доктор", "долг", "доля", "дракон",
    "драма", "дробь", "дружба", "дуб", "дума", "духи", "дыра", "дятел", "Египет",
    "единорог", "ёж", "ёлка", "ёрш", "жасмин", "железо", "жизнь", "жила", "журавль",
    "жучок", "забор", "завод", "заговор", "закат", "залив", "залог", "замок", "заноза",
    "запад", "запах", "заяц", "звезда", "звонок", "звук", "зебра", "зелень", "земля",
    "зерно", "зима", "змей", "знак", "золото", "зона", "зуб", "игла", "игра", "икра",
    "Индия", "институт", "инструмент", "ирис", "искра", "источник", "кабачок", "кабинет",
    "кавалер", "кадр", "казино", "камень", "камера", "канал", "кант", "капитан", "карабин",
    "караул", "карлик", "карта", "каток", "каша", "квадрат", "кенгуру", "кентавр", "кетчуп",
    "киви", "кино", "кисть", "кит", "Китай", "класс", "клетка", "клинок", "клуб", "клык",
    "ключ", "кнопка", "козёл", "код", "кокетка", "кол", "колода", "колонка", "колонна",
    "кольцо", "команда", "комета", "конёк", "контрабандист", "концерт", "кора", "корабль",
    "корень", "корова", "королева", "король", "корона", "коса", "космос", "кость", "костюм",
    "косяк", "кот", "котелок", "кошка", "край", "кран", "крепость", "крест", "кровать",
    "крокодил", "кролик", "крона", "крошка", "круг", "крыло", "куб", "кулак", "курорт",
    "курс", "куст", "лавка", "лад", "ладья", "лазер", "лама", "лампа", "ласка", "лебедь",
    "лев", "легенда", "лёд", "лезвие", "лейка", "лес", "лето", "лимон", "лимузин",
    "линейка", "линия", "липа", "лист", "лицо", "ложе", "ложка", "лом", "Лондон", "лопатка",
    "лот", "лошадь", "лук", "луна", "луч", "любовь", "магазин", "мак", "малина", "мамонт",
    "мантия", "мандарин", "марка", "марс", "марш", "маска", "масло", "масса", "мастер",
    "мат", "машина", "маяк", "мёд", "медведь", "мелочь", "место", "метеор", "механизм",
    "меч", "мечта", "микроскоп", "миллионер", "мина", "мир", "модель", "модуль", "молния",
    "моль", "море", "морковь", "мороженое", "Москва", "мост", "мотив", "музыка", "мука",
    "мушка", "мышь", "мята", "мяч", "надежда", "налёт", "Наполеон", "наряд", "небо",
    "небоскрёб", "ниндзя", "нитка", "нога", "нож", "номер", "норка", "нос", "носок", "нота",
    "ночь", "няня", "обезьяна", "область", "облом", "образ", "образование", "обрез",
    "обувь", "овал", "овсянка", "огонь", "огород", "одежда", "океан", "окно", "олень",
    "олигарх", "Олимп", "опера", "операция", "опыт", "орган", "орден", "орёл", "орех",
    "осень", "осьминог", "отель", "отрава", "охранник", "очки", "падение", "палата",
    "палец", "палочка", "панама", "панель", "пара", "парад", "парашют", "Париж", "парк",
    "партия", "пассаж", "патрон", "паук", "пачка", "перевод", "переворот", "перемена",
    "перец", "перо", "перчатка", "печать", "пики", "пила", "пилот", "пингвин", "пирамида",
    "пират", "пистолет", "письмо", "Питер", "пластик", "плата", "платформа", "платье",
    "плёнка", "плитка", "плод", "пломба", "площадь", "пляж", "побег", "победа", "повар",
    "погон", "подарок", "подкова", "подъём", "поезд", "покров", "пол", "поле", "полет",
    "полис", "полиция", "полоса", "помёт", "помпа", "порода", "порт", "посол", "пост",
    "поток", "почка", "пояс", "право", "праздник", "преграда", "предложение", "предмет",
    "пресс", "преступник", "прибор", "привод", "призрак", "принцесса", "пришелец", "проба",
    "пробка", "провод", "проводник", "программа", "проказа", "прокат", "проспект",
    "профиль", "путешествие", "путь", "Пушкин", "пятачок", "радуга", "разведчик", "развод",
    "разворот", "разряд", "рак", "ракета", "раковина", "рассказ", "раствор", "резина",
    "река", "ресторан", "рецепт", "Рим", "риф", "робот", "рог", "род", "роза", "рок",
    "роман", "Россия", "рот", "рояль", "ртуть", "рубашка", "рубка", "ружье", "рука",
    "рукав", "рулетка", "ручка", "рыба", "рынок", "рысь", "рыцарь", "сад", "салат", "салют",
    "самолет", "сантехник", "Сатурн", "сачок", "свет", "свеча", "свидетель", "секрет",
    "секция", "сердце", "сеть", "сидение", "сила", "сирень", "скала", "скат", "склад",
    "скрипка", "слава", "слон", "смена", "смерть", "снаряд", "снег", "снеговик", "снимок",
    "собака", "сова", "совет", "солдат", "солнце", "соль", "сон", "состав", "союз", "сплав",
    "спорт", "спутник", "среда", "ссылка", "ставка", "стадион", "стан", "станок", "ствол",
    "стекло", "стена", "стойка", "стол", "столб", "стопа", "стопка", "страна", "стрела",
    "строй", "строчка", "струна", "студент", "стул", "ступень", "судьба", "супергерой",
    "сфера", "схема", "счёт", "съезд", "таз", "такса", "такт", "танец", "тарелка", "тату",
    "театр", "телега", "телескоп", "телефон", "тень", "тепло", "техника", "течение", "тигр",
    "титан", "титул", "ткань", "ток", "том", "точка", "трава", "треугольник", "тройка",
    "труба", "труд", "туба", "тур", "удар", "ударник", "удача", "удел", "узел", "Урал",
    "уран", "урна", "уровень", "утка", "утконос", "утро", "учёный", "учитель", "фаза",
    "факел", "фаланга", "феникс", "ферма", "фига", "финка", "флейта", "фокус", "фонтан",
    "форма", "хвост", "хлопок", "холод", "царь", "цветок", "Цезарь", "центр", "церковь",
    "цилиндр", "частица", "часы", "черви", "честь", "член", "шайба", "шайка", "шар", "шах",
    "шашка", "шина", "шишка", "шкала", "школа", "шоколад", "шпагат", "шпилька", "шпион",
    "штат", "шуба", "шум", "экран", "элемент", "эльф", "эфир", "Юпитер", "юрист", "яблоко",
    "ягода", "яд", "ядро", "язык", "якорь", "Япония", "ясли", "ячмень",
];

/// An ordered list of distinct words.
///
/// Duplicates are removed at construction, so drawing distinct positions
/// always yields distinct words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// The built-in word list.
    pub fn builtin() -> Self {
        Self {
            words: dedup(BUILTIN_WORDS.iter().copied()),
        }
    }

    /// Builds a dictionary from arbitrary words. Blank entries are skipped
    /// and surrounding whitespace trimmed.
    pub fn from_words<I, S>(words: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = dedup(words.into_iter().map(|w| w.as_ref().trim().to_string()));
        if words.is_empty() {
            return Err(AppError::configuration("Dictionary contains no words"));
        }
        Ok(Self { words })
    }

    /// Parses a comma or newline separated word list.
    pub fn parse(source: &str) -> AppResult<Self> {
        Self::from_words(source.split([',', '\n']))
    }

    /// Loads a word list file.
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to read dictionary {}", path.display()),
                e,
            )
        })?;
        Self::parse(&source)
    }

    /// Loads the configured dictionary, falling back to the built-in one.
    pub fn load(config: &GameConfig) -> AppResult<Self> {
        let dictionary = match &config.dictionary_path {
            Some(path) => Self::from_path(path)?,
            None => Self::builtin(),
        };
        info!(
            words = dictionary.len(),
            source = config.dictionary_path.as_deref().unwrap_or("builtin"),
            "Dictionary loaded"
        );
        Ok(dictionary)
    }

    /// All words, in order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary is empty. Never true for a constructed value.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn dedup<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    words
        .into_iter()
        .map(Into::into)
        .filter(|w: &String| !w.is_empty() && seen.insert(w.clone()))
        .collect()
}
